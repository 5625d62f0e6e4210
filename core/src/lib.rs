#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use records::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod records;
mod snapshot;
mod tile;
mod types;

/// What a tile shows: a photograph or a four-digit number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMode {
    Photo,
    Number,
}

impl Default for TileMode {
    fn default() -> Self {
        Self::Photo
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: GridSize,
    pub mode: TileMode,
}

impl GameConfig {
    pub const fn new_unchecked(grid_size: GridSize, mode: TileMode) -> Self {
        Self { grid_size, mode }
    }

    pub fn new(grid_size: GridSize, mode: TileMode) -> Self {
        let grid_size = grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        Self::new_unchecked(grid_size, mode)
    }

    pub const fn total_tiles(&self) -> TileCount {
        square(self.grid_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(3, TileMode::Photo)
    }
}
