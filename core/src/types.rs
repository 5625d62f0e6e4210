use alloc::string::String;

/// Side length of the square board.
pub type GridSize = u8;

/// Count type used for tile counts and recall positions.
pub type TileCount = u16;

/// Whole seconds of game time.
pub type Seconds = u32;

/// Comparison key of a tile: an image identifier in photo mode, a numeral
/// string in number mode. Display identity is tracked separately, see
/// `Tile::id`.
pub type TileContent = String;

/// Smallest playable board.
pub const MIN_GRID_SIZE: GridSize = 2;

/// Largest playable board.
pub const MAX_GRID_SIZE: GridSize = 5;

pub const fn square(n: GridSize) -> TileCount {
    let n = n as TileCount;
    n.saturating_mul(n)
}
