use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use memogrid_core as game;
use yew::prelude::*;

use crate::settings;
use crate::sound::{Cue, SoundBank};
use crate::utils::*;
use crate::view::*;
use game::BestTimeStore;

/// Pause between the last memorize click and the recall shuffle.
const SHUFFLE_DELAY_MS: u32 = 500;

const CLOCK_PERIOD_MS: u32 = 1_000;

impl StorageKey for game::GameEngine {
    const KEY: &'static str = "memogrid:game:v1";
}

impl StorageKey for game::BestTimes {
    const KEY: &'static str = "memogrid:best-times";
}

/// Bundled photo identifiers, enough to fill the largest grid.
fn image_pool() -> game::ImagePool {
    let ids = (1..=game::square(game::MAX_GRID_SIZE))
        .map(|i| format!("img/tile-{i:02}.jpg"))
        .collect();
    game::ImagePool::new(ids).expect("bundled pool covers the largest grid")
}

/// Accepts a restored engine only if its state holds together. A stored blob
/// that parses but is inconsistent is discarded, keeping the configured grid
/// size and mode clamped to the supported range.
fn sanitized_engine(engine: game::GameEngine) -> game::GameEngine {
    match engine.validate() {
        Ok(()) => engine,
        Err(err) => {
            log::warn!("discarding saved game: {err}");
            let config = engine.config();
            game::GameEngine::new(game::GameConfig::new(config.grid_size, config.mode))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    TileActivated(game::TileContent),
    StartGame,
    BeginRecall,
    ClockTick,
    GridSizeSelected(game::GridSize),
    ModeSelected(game::TileMode),
    ToggleSettings,
    UpdateSettings(settings::Settings),
    DismissComparison,
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force the tile generation seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) struct GameView {
    engine: game::GameEngine,
    best_times: game::BestTimes,
    settings: settings::Settings,
    sounds: SoundBank,
    seed: u64,
    last_record: Option<game::BestTimeUpdate>,
    comparison_open: bool,
    settings_open: bool,
    clock: Option<Interval>,
    pending_shuffle: Option<Timeout>,
}

impl GameView {
    fn on_start_game(&mut self) -> bool {
        // a shuffle scheduled by the previous game must not fire into this one
        self.pending_shuffle = None;

        let generator = game::RandomTileSetGenerator::new(self.seed, image_pool());
        match self.engine.start_with(generator) {
            Ok(()) => {
                self.seed = js_random_seed();
                self.last_record = None;
                self.comparison_open = false;
                true
            }
            Err(err) => {
                log::error!("could not start a game: {err}");
                false
            }
        }
    }

    fn on_tile_activated(&mut self, ctx: &Context<Self>, content: &str) -> bool {
        let outcome = match self.engine.tile_activated(content) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("tile activation rejected: {err}");
                return false;
            }
        };

        self.play_cue(outcome);

        match outcome {
            game::ClickOutcome::MemorizeComplete => self.schedule_shuffle(ctx),
            game::ClickOutcome::Won => self.record_win(),
            game::ClickOutcome::Mismatch => self.comparison_open = true,
            _ => {}
        }

        outcome.has_update()
    }

    fn record_win(&mut self) {
        let update = self
            .best_times
            .record(self.engine.grid_size(), self.engine.elapsed_secs());
        if update.is_record() {
            self.best_times.local_save();
        }
        self.last_record = Some(update);
    }

    fn play_cue(&mut self, outcome: game::ClickOutcome) {
        use game::ClickOutcome::*;

        if !self.settings.sound_enabled {
            return;
        }

        let cue = match outcome {
            NoChange => return,
            Memorized | MemorizeComplete | Matched => Cue::Click,
            Won => Cue::Win,
            Mismatch => Cue::Lose,
        };
        self.sounds.play(cue);
    }

    /// Keeps exactly one interval alive while the game clock should run.
    /// Dropping the handle cancels the interval.
    fn sync_clock(&mut self, ctx: &Context<Self>) {
        let should_run = self.engine.phase().is_active();
        match (&self.clock, should_run) {
            (None, true) => {
                let link = ctx.link().clone();
                self.clock = Some(Interval::new(CLOCK_PERIOD_MS, move || {
                    link.send_message(Msg::ClockTick)
                }));
            }
            (Some(_), false) => self.clock = None,
            _ => {}
        }
    }

    fn schedule_shuffle(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        // replacing the handle cancels any previously scheduled shuffle
        self.pending_shuffle = Some(Timeout::new(SHUFFLE_DELAY_MS, move || {
            link.send_message(Msg::BeginRecall)
        }));
    }

    fn get_best_time(&self) -> Option<game::Seconds> {
        self.best_times.get(self.engine.grid_size())
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            engine: sanitized_engine(LocalOrDefault::local_or_default()),
            best_times: LocalOrDefault::local_or_default(),
            settings: LocalOrDefault::local_or_default(),
            sounds: SoundBank::default(),
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            last_record: None,
            comparison_open: false,
            settings_open: false,
            clock: None,
            pending_shuffle: None,
        };

        // resume a persisted session: restart the clock, and re-arm the
        // shuffle if the page unloaded between the last memorize click and
        // the shuffle firing
        view.sync_clock(ctx);
        if view.engine.awaiting_shuffle() {
            view.schedule_shuffle(ctx);
        }

        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            TileActivated(content) => self.on_tile_activated(ctx, &content),
            StartGame => self.on_start_game(),
            BeginRecall => {
                self.pending_shuffle = None;
                self.engine.begin_recall(js_random_seed()).has_update()
            }
            ClockTick => self.engine.tick(),
            GridSizeSelected(grid_size) => match self.engine.set_grid_size(grid_size) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("grid size change rejected: {err}");
                    false
                }
            },
            ModeSelected(mode) => match self.engine.set_mode(mode) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("mode change rejected: {err}");
                    false
                }
            },
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                if !self.settings_open {
                    self.settings = LocalOrDefault::local_or_default();
                }
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    true
                } else {
                    false
                }
            }
            DismissComparison => {
                let was_open = self.comparison_open;
                self.comparison_open = false;
                was_open
            }
        };

        self.sync_clock(ctx);
        self.engine.local_save();
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;
        use Msg::*;

        let snapshot = game::Snapshot::from_engine(&self.engine);
        let in_progress = snapshot.phase.is_active();

        let cb_tile = ctx.link().callback(TileActivated);
        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            StartGame
        });
        let cb_grid_size = ctx.link().callback(GridSizeSelected);
        let cb_mode = ctx.link().callback(ModeSelected);
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_close_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_update_settings = ctx.link().callback(UpdateSettings);
        let cb_dismiss_comparison = ctx.link().callback(|_| DismissComparison);

        html! {
            <div class="memogrid">
                <small onclick={cb_show_settings}>{"···"}</small>
                <StatsView
                    elapsed_secs={snapshot.elapsed_secs}
                    best_time={self.get_best_time()}
                    total_tiles={snapshot.config.total_tiles()}
                />
                <ControlsView
                    config={snapshot.config}
                    {in_progress}
                    on_grid_size={cb_grid_size}
                    on_mode={cb_mode}
                    on_start={cb_start}
                />
                <StatusView snapshot={snapshot.clone()} record={self.last_record} />
                <BoardView snapshot={snapshot.clone()} on_activate={cb_tile} />
                if self.comparison_open {
                    <OrderComparisonView
                        snapshot={snapshot}
                        on_close={cb_dismiss_comparison}
                    />
                }
                <RulesView />
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings}
                    on_change={cb_update_settings}
                    on_close={cb_close_settings}
                />
            </div>
        }
    }
}
