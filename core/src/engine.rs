use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Stage of a single game session.
///
/// `Idle -> Memorizing` on start, `Memorizing -> Recalling` once every tile
/// was memorized and the board reshuffled, `Recalling -> Complete` on the
/// first mismatch or the last match. Starting a new game is accepted from any
/// stage and goes back to `Memorizing`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Memorizing,
    Recalling,
    Complete,
}

impl Phase {
    /// The game clock runs only in these phases.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Memorizing | Self::Recalling)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Grid size and tile mode may only change between games.
    pub const fn allows_reconfigure(self) -> bool {
        matches!(self, Self::Idle | Self::Complete)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Final result of a completed game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    /// Leading recall clicks that matched the memorized order.
    pub correct_count: TileCount,
}

/// What a tile activation did to the game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Memorized,
    /// The whole board is memorized; the caller should schedule the recall
    /// shuffle.
    MemorizeComplete,
    Matched,
    Won,
    Mismatch,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Memorized => true,
            MemorizeComplete => true,
            Matched => true,
            Won => true,
            Mismatch => true,
        }
    }

    /// Whether this click ended the game.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Mismatch)
    }
}

/// What `begin_recall` did to the game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShuffleOutcome {
    NoChange,
    Shuffled,
}

impl ShuffleOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Shuffled => true,
        }
    }
}

/// Owns one game session from configuration through completion.
///
/// Every mutation reports whether it changed observable state, so callers can
/// decide whether to redraw. Inputs that arrive in the wrong phase are
/// ignored rather than rejected, only structurally invalid inputs error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    config: GameConfig,
    tiles: Vec<Tile>,
    memorized_order: Vec<TileContent>,
    recalled_order: Vec<TileContent>,
    spent_contents: BTreeSet<TileContent>,
    phase: Phase,
    elapsed_secs: Seconds,
    outcome: Option<GameOutcome>,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            tiles: Vec::new(),
            memorized_order: Vec::new(),
            recalled_order: Vec::new(),
            spent_contents: BTreeSet::new(),
            phase: Default::default(),
            elapsed_secs: 0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid_size(&self) -> GridSize {
        self.config.grid_size
    }

    /// Tiles in display order. Empty until the first game starts.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn total_tiles(&self) -> TileCount {
        self.config.total_tiles()
    }

    pub fn memorized_order(&self) -> &[TileContent] {
        &self.memorized_order
    }

    pub fn recalled_order(&self) -> &[TileContent] {
        &self.recalled_order
    }

    /// Contents already clicked in the current phase. These render as
    /// disabled and further clicks on them are ignored.
    pub fn spent_contents(&self) -> &BTreeSet<TileContent> {
        &self.spent_contents
    }

    pub fn is_spent(&self, content: &str) -> bool {
        self.spent_contents.contains(content)
    }

    pub fn elapsed_secs(&self) -> Seconds {
        self.elapsed_secs
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Every tile is memorized but the recall shuffle has not happened yet.
    pub fn awaiting_shuffle(&self) -> bool {
        matches!(self.phase, Phase::Memorizing)
            && !self.tiles.is_empty()
            && self.memorized_order.len() == self.tiles.len()
    }

    /// Checks the cross-field invariants the event methods rely on.
    ///
    /// Every state reachable through the engine API passes. A deserialized
    /// state may not; restore paths should discard whatever fails here.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.config.grid_size) {
            return Err(GameError::InvalidGameState);
        }

        let mut contents = BTreeSet::new();
        for tile in &self.tiles {
            if !contents.insert(tile.content.as_str()) {
                return Err(GameError::DuplicateContent);
            }
        }

        let total = usize::from(self.config.total_tiles());
        if self.phase != Phase::Idle && self.tiles.len() != total {
            return Err(GameError::WrongTileCount);
        }

        for order in [&self.memorized_order, &self.recalled_order] {
            let mut seen = BTreeSet::new();
            for content in order {
                if !contents.contains(content.as_str()) {
                    return Err(GameError::UnknownContent);
                }
                if !seen.insert(content.as_str()) {
                    return Err(GameError::InvalidGameState);
                }
            }
        }

        for content in &self.spent_contents {
            if !contents.contains(content.as_str()) {
                return Err(GameError::UnknownContent);
            }
        }

        let shape_holds = match self.phase {
            Phase::Idle => {
                self.tiles.is_empty()
                    && self.memorized_order.is_empty()
                    && self.recalled_order.is_empty()
                    && self.spent_contents.is_empty()
                    && self.elapsed_secs == 0
                    && self.outcome.is_none()
            }
            Phase::Memorizing => self.recalled_order.is_empty() && self.outcome.is_none(),
            Phase::Recalling => {
                self.memorized_order.len() == self.tiles.len()
                    && self.recalled_order.len() < self.memorized_order.len()
                    && self.outcome.is_none()
            }
            Phase::Complete => self.outcome.is_some(),
        };

        if shape_holds {
            Ok(())
        } else {
            Err(GameError::InvalidGameState)
        }
    }

    /// Starts a new game over a freshly generated tile set. Accepted from any
    /// phase; a running game is discarded.
    pub fn start_with(&mut self, generator: impl TileSetGenerator) -> Result<()> {
        let tile_set = generator.generate(self.config)?;
        self.start(tile_set);
        Ok(())
    }

    /// Adopts `tile_set` (and its config) and resets every per-game field.
    pub fn start(&mut self, tile_set: TileSet) {
        let (config, tiles) = tile_set.into_parts();
        log::debug!(
            "new game: {}x{} {:?}",
            config.grid_size,
            config.grid_size,
            config.mode
        );

        self.config = config;
        self.tiles = tiles;
        self.memorized_order.clear();
        self.recalled_order.clear();
        self.spent_contents.clear();
        self.elapsed_secs = 0;
        self.outcome = None;
        self.phase = Phase::Memorizing;
    }

    /// Feeds one tile activation into the state machine.
    ///
    /// Clicks outside the memorize/recall phases and clicks on spent contents
    /// are ignored with `NoChange`. A content that is not part of the current
    /// tile set is an error.
    pub fn tile_activated(&mut self, content: &str) -> Result<ClickOutcome> {
        if !self.phase.is_active() {
            return Ok(ClickOutcome::NoChange);
        }

        self.validate_content(content)?;

        if self.is_spent(content) {
            return Ok(ClickOutcome::NoChange);
        }

        Ok(match self.phase {
            Phase::Memorizing => self.record_memorize_click(content),
            Phase::Recalling => self.record_recall_click(content),
            // is_active() filtered these out
            Phase::Idle | Phase::Complete => ClickOutcome::NoChange,
        })
    }

    /// Reshuffles the display order and enters the recall phase.
    ///
    /// Only the all-memorized state accepts this; anything else reports
    /// `NoChange`, which makes a stale scheduled shuffle harmless after the
    /// player restarted in the meantime.
    pub fn begin_recall(&mut self, shuffle_seed: u64) -> ShuffleOutcome {
        use rand::prelude::*;

        if !self.awaiting_shuffle() {
            log::trace!("begin_recall ignored in {:?}", self.phase);
            return ShuffleOutcome::NoChange;
        }

        let mut rng = SmallRng::seed_from_u64(shuffle_seed);
        // display order only, contents and the memorized order stay put
        self.tiles.shuffle(&mut rng);
        self.spent_contents.clear();
        self.phase = Phase::Recalling;
        log::debug!("recall phase, {} tiles reshuffled", self.tiles.len());
        ShuffleOutcome::Shuffled
    }

    /// Advances the game clock by one whole second.
    ///
    /// Ticks outside the memorize/recall phases are ignored, so a clock that
    /// outlives the game cannot advance a finished session. Returns whether
    /// the elapsed time changed.
    pub fn tick(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    /// Changes the grid size for the next game, clamped like
    /// `GameConfig::new`. Rejected while a game is running.
    pub fn set_grid_size(&mut self, grid_size: GridSize) -> Result<()> {
        self.check_reconfigure_allowed()?;
        self.config = GameConfig::new(grid_size, self.config.mode);
        Ok(())
    }

    /// Changes the tile mode for the next game. Rejected while a game is
    /// running.
    pub fn set_mode(&mut self, mode: TileMode) -> Result<()> {
        self.check_reconfigure_allowed()?;
        self.config = GameConfig::new(self.config.grid_size, mode);
        Ok(())
    }

    fn record_memorize_click(&mut self, content: &str) -> ClickOutcome {
        self.memorized_order.push(content.into());
        self.spent_contents.insert(content.into());
        log::trace!(
            "memorize click {}/{}",
            self.memorized_order.len(),
            self.tiles.len()
        );

        if self.memorized_order.len() == self.tiles.len() {
            ClickOutcome::MemorizeComplete
        } else {
            ClickOutcome::Memorized
        }
    }

    fn record_recall_click(&mut self, content: &str) -> ClickOutcome {
        self.recalled_order.push(content.into());
        self.spent_contents.insert(content.into());

        let position = self.recalled_order.len();
        // a restored save can claim the recall phase without a memorized
        // entry at this position; that counts as a mismatch, not a panic
        let matched = self
            .memorized_order
            .get(position - 1)
            .is_some_and(|expected| *expected == self.recalled_order[position - 1]);

        if !matched {
            self.end_game(GameOutcome {
                won: false,
                correct_count: (position - 1).try_into().unwrap(),
            });
            ClickOutcome::Mismatch
        } else if position == self.memorized_order.len() {
            self.end_game(GameOutcome {
                won: true,
                correct_count: position.try_into().unwrap(),
            });
            ClickOutcome::Won
        } else {
            log::trace!("recall click {}/{}", position, self.memorized_order.len());
            ClickOutcome::Matched
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        if self.phase.is_finished() {
            return;
        }

        log::debug!(
            "game complete: won={} correct={} elapsed={}s",
            outcome.won,
            outcome.correct_count,
            self.elapsed_secs
        );
        self.outcome = Some(outcome);
        self.phase = Phase::Complete;
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if self.tiles.iter().any(|tile| tile.content == content) {
            Ok(())
        } else {
            Err(GameError::UnknownContent)
        }
    }

    fn check_reconfigure_allowed(&self) -> Result<()> {
        if self.phase.allows_reconfigure() {
            Ok(())
        } else {
            Err(GameError::GameInProgress)
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
