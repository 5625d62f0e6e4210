use crate::types::TileCount;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Content pool holds {available} values but {required} are needed")]
    PoolTooSmall {
        required: TileCount,
        available: TileCount,
    },
    #[error("Tile count does not match the configured grid")]
    WrongTileCount,
    #[error("Duplicate tile content")]
    DuplicateContent,
    #[error("Content is not part of the current tile set")]
    UnknownContent,
    #[error("Game state is internally inconsistent")]
    InvalidGameState,
    #[error("Game in progress, configuration is locked")]
    GameInProgress,
}

pub type Result<T> = core::result::Result<T, GameError>;
