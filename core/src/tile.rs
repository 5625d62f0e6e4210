use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single board tile.
///
/// `content` is what the player memorizes and what recall clicks are compared
/// by. `id` stays attached to the tile across the recall shuffle and only
/// identifies it for display purposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub content: TileContent,
}

impl Tile {
    pub fn new(id: impl Into<String>, content: impl Into<TileContent>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// A validated set of tiles for one game: exactly `grid_size * grid_size`
/// tiles with pairwise distinct contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTileSet")]
pub struct TileSet {
    config: GameConfig,
    tiles: Vec<Tile>,
}

/// Raw mirror of [`TileSet`] that deserialization goes through, so stored
/// data cannot skip the [`TileSet::new`] checks.
#[derive(Deserialize)]
struct UncheckedTileSet {
    config: GameConfig,
    tiles: Vec<Tile>,
}

impl TryFrom<UncheckedTileSet> for TileSet {
    type Error = GameError;

    fn try_from(unchecked: UncheckedTileSet) -> Result<Self> {
        Self::new(unchecked.config, unchecked.tiles)
    }
}

impl TileSet {
    pub fn new(config: GameConfig, tiles: Vec<Tile>) -> Result<Self> {
        if tiles.len() != usize::from(config.total_tiles()) {
            return Err(GameError::WrongTileCount);
        }

        let mut seen = BTreeSet::new();
        for tile in &tiles {
            if !seen.insert(tile.content.as_str()) {
                return Err(GameError::DuplicateContent);
            }
        }

        Ok(Self { config, tiles })
    }

    pub fn game_config(&self) -> GameConfig {
        self.config
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn total_tiles(&self) -> TileCount {
        self.tiles.len().try_into().unwrap()
    }

    pub(crate) fn into_parts(self) -> (GameConfig, Vec<Tile>) {
        (self.config, self.tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    fn tiles(contents: &[&str]) -> Vec<Tile> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| Tile::new(format!("tile-{i}"), *content))
            .collect()
    }

    #[test]
    fn accepts_a_full_distinct_grid() {
        let config = GameConfig::new(2, TileMode::Number);
        let tile_set = TileSet::new(config, tiles(&["10", "11", "12", "13"])).unwrap();

        assert_eq!(tile_set.total_tiles(), 4);
        assert_eq!(tile_set.game_config(), config);
    }

    #[test]
    fn rejects_wrong_tile_count() {
        let config = GameConfig::new(2, TileMode::Number);
        let result = TileSet::new(config, tiles(&["10", "11", "12"]));

        assert_eq!(result, Err(GameError::WrongTileCount));
    }

    #[test]
    fn rejects_duplicate_contents() {
        let config = GameConfig::new(2, TileMode::Number);
        let result = TileSet::new(config, tiles(&["10", "11", "10", "13"]));

        assert_eq!(result, Err(GameError::DuplicateContent));
    }

    #[test]
    fn rejects_empty_tile_list() {
        let config = GameConfig::new(2, TileMode::Number);
        let result = TileSet::new(config, vec![]);

        assert_eq!(result, Err(GameError::WrongTileCount));
    }

    #[test]
    fn deserialization_reruns_the_constructor_checks() {
        let config = GameConfig::new(2, TileMode::Number);
        let tile_set = TileSet::new(config, tiles(&["10", "11", "12", "13"])).unwrap();
        let json = serde_json::to_string(&tile_set).unwrap();

        let restored: TileSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tile_set);

        // a hand-edited blob with a repeated content must not parse
        let duplicated = json.replace("\"11\"", "\"10\"");
        assert!(serde_json::from_str::<TileSet>(&duplicated).is_err());
    }
}
