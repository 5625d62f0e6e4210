use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Strategy for producing a validated tile set for one game.
pub trait TileSetGenerator {
    fn generate(self, config: GameConfig) -> Result<TileSet>;
}

/// Fixed collection of distinct image identifiers that photo-mode tiles are
/// drawn from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagePool {
    ids: Vec<String>,
}

impl ImagePool {
    /// Builds a pool, requiring pairwise distinct identifiers and enough of
    /// them to fill the largest supported grid.
    pub fn new(ids: Vec<String>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(GameError::DuplicateContent);
            }
        }

        let available = ids.len().try_into().unwrap_or(TileCount::MAX);
        let required = square(MAX_GRID_SIZE);
        if available < required {
            return Err(GameError::PoolTooSmall {
                required,
                available,
            });
        }

        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn available(&self) -> TileCount {
        self.ids.len().try_into().unwrap_or(TileCount::MAX)
    }

    pub(crate) fn into_ids(self) -> Vec<String> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn pool_requires_cover_for_the_largest_grid() {
        let ids = (0..24).map(|i| format!("img-{i:02}")).collect();

        let result = ImagePool::new(ids);

        assert_eq!(
            result,
            Err(GameError::PoolTooSmall {
                required: 25,
                available: 24,
            })
        );
    }

    #[test]
    fn pool_rejects_duplicate_identifiers() {
        let mut ids: Vec<_> = (0..25).map(|i| format!("img-{i:02}")).collect();
        ids[7] = "img-03".into();

        assert_eq!(ImagePool::new(ids), Err(GameError::DuplicateContent));
    }

    #[test]
    fn pool_accepts_exactly_enough_identifiers() {
        let ids: Vec<_> = (0..25).map(|i| format!("img-{i:02}")).collect();

        let pool = ImagePool::new(ids).unwrap();

        assert_eq!(pool.available(), 25);
        assert_eq!(pool.ids().len(), 25);
    }
}
