use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable copy of everything a presentation layer needs after an engine
/// event. Two snapshots compare equal exactly when the observable game state
/// is the same.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub config: GameConfig,
    pub tiles: Vec<Tile>,
    pub memorized_order: Vec<TileContent>,
    pub recalled_order: Vec<TileContent>,
    pub spent_contents: BTreeSet<TileContent>,
    pub elapsed_secs: Seconds,
    pub outcome: Option<GameOutcome>,
}

impl Snapshot {
    pub fn from_engine(engine: &GameEngine) -> Self {
        Self {
            phase: engine.phase(),
            config: engine.config(),
            tiles: engine.tiles().to_vec(),
            memorized_order: engine.memorized_order().to_vec(),
            recalled_order: engine.recalled_order().to_vec(),
            spent_contents: engine.spent_contents().clone(),
            elapsed_secs: engine.elapsed_secs(),
            outcome: engine.outcome(),
        }
    }

    /// Pairs each recalled content with the memorized content expected at
    /// that position and whether they matched.
    pub fn recall_comparison(&self) -> impl Iterator<Item = (&TileContent, &TileContent, bool)> {
        self.memorized_order
            .iter()
            .zip(&self.recalled_order)
            .map(|(expected, clicked)| (expected, clicked, expected == clicked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    fn played_engine() -> GameEngine {
        let config = GameConfig::new(2, TileMode::Number);
        let tiles = ["51", "52", "53", "54"]
            .iter()
            .enumerate()
            .map(|(i, content)| Tile::new(format!("tile-{i}"), *content))
            .collect();
        let mut engine = GameEngine::new(config);
        engine.start(TileSet::new(config, tiles).unwrap());
        for content in ["52", "51", "54", "53"] {
            engine.tile_activated(content).unwrap();
        }
        engine.begin_recall(9);
        engine.tick();
        engine.tile_activated("52").unwrap();
        engine.tile_activated("54").unwrap();
        engine
    }

    #[test]
    fn snapshot_mirrors_the_engine() {
        let engine = played_engine();

        let snapshot = Snapshot::from_engine(&engine);

        assert_eq!(snapshot.phase, engine.phase());
        assert_eq!(snapshot.tiles, engine.tiles());
        assert_eq!(snapshot.memorized_order, engine.memorized_order());
        assert_eq!(snapshot.recalled_order, engine.recalled_order());
        assert_eq!(snapshot.elapsed_secs, 1);
        assert_eq!(snapshot.outcome, engine.outcome());
    }

    #[test]
    fn ignored_events_leave_the_snapshot_unchanged() {
        let mut engine = played_engine();
        let before = Snapshot::from_engine(&engine);

        // the game ended on the second recall click, these must all be inert
        engine.tile_activated("51").unwrap();
        engine.begin_recall(10);
        engine.tick();

        assert_eq!(Snapshot::from_engine(&engine), before);
    }

    #[test]
    fn recall_comparison_flags_the_mismatch_position() {
        let engine = played_engine();
        let snapshot = Snapshot::from_engine(&engine);

        let rows: Vec<_> = snapshot.recall_comparison().collect();

        assert_eq!(rows.len(), 2);
        let (expected, clicked, matched) = rows[0];
        assert_eq!((expected.as_str(), clicked.as_str(), matched), ("52", "52", true));
        let (expected, clicked, matched) = rows[1];
        assert_eq!((expected.as_str(), clicked.as_str(), matched), ("51", "54", false));
    }
}
