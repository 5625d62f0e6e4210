use memogrid_core as game;
use yew::prelude::*;

use crate::utils::*;

/// One line describing what the player should do right now, or how the
/// finished round went.
pub(crate) fn status_line(snapshot: &game::Snapshot) -> String {
    use game::Phase::*;

    match snapshot.phase {
        Idle => "Click every tile once in an order of your choice, then repeat it.".into(),
        Memorizing => format!(
            "Memorize your order: {}/{}",
            snapshot.memorized_order.len(),
            snapshot.tiles.len()
        ),
        Recalling => format!(
            "Repeat your order: {}/{}",
            snapshot.recalled_order.len(),
            snapshot.tiles.len()
        ),
        Complete => match snapshot.outcome {
            Some(outcome) if outcome.won => {
                format!("You won in {}!", format_time(snapshot.elapsed_secs))
            }
            Some(outcome) => format!(
                "Wrong tile! {} of {} correct.",
                outcome.correct_count,
                snapshot.tiles.len()
            ),
            None => String::new(),
        },
    }
}

/// Follow-up line after a win, depending on what happened to the record.
pub(crate) fn record_line(update: game::BestTimeUpdate) -> String {
    use game::BestTimeUpdate::*;

    match update {
        FirstRecord => "First clear at this size, time recorded!".into(),
        Improved { previous } => {
            format!("New best time! Previous was {}.", format_time(previous))
        }
        NotImproved { best } => {
            format!("The record at this size remains {}.", format_time(best))
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TileButtonProps {
    tile: game::Tile,
    mode: game::TileMode,
    #[prop_or_default]
    spent: bool,
    #[prop_or_default]
    locked: bool,
    on_activate: Callback<game::TileContent>,
}

#[function_component(TileButton)]
fn tile_button(props: &TileButtonProps) -> Html {
    let TileButtonProps {
        tile,
        mode,
        spent,
        locked,
        on_activate,
    } = props.clone();

    let class = classes!(
        "tile",
        spent.then_some("spent"),
        match mode {
            game::TileMode::Photo => "photo",
            game::TileMode::Number => "number",
        }
    );

    let onclick = {
        let content = tile.content.clone();
        Callback::from(move |_: MouseEvent| on_activate.emit(content.clone()))
    };

    html! {
        <button {class} {onclick} disabled={spent || locked}>
            {
                match mode {
                    game::TileMode::Photo => html! {
                        <img src={tile.content.clone()} alt="memory tile" draggable="false" />
                    },
                    game::TileMode::Number => html! {
                        <span>{tile.content.clone()}</span>
                    },
                }
            }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct BoardProps {
    pub snapshot: game::Snapshot,
    pub on_activate: Callback<game::TileContent>,
}

#[function_component(BoardView)]
pub(crate) fn board_view(props: &BoardProps) -> Html {
    let snapshot = &props.snapshot;
    let locked = !snapshot.phase.is_active();
    let style = format!("--grid-size: {}", snapshot.config.grid_size);

    html! {
        <div class="board" {style}>
            {
                for snapshot.tiles.iter().map(|tile| {
                    let spent = snapshot.spent_contents.contains(&tile.content);
                    html! {
                        <TileButton
                            key={tile.id.clone()}
                            tile={tile.clone()}
                            mode={snapshot.config.mode}
                            {spent}
                            {locked}
                            on_activate={props.on_activate.clone()}
                        />
                    }
                })
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct StatsProps {
    pub elapsed_secs: game::Seconds,
    pub best_time: Option<game::Seconds>,
    pub total_tiles: game::TileCount,
}

#[function_component(StatsView)]
pub(crate) fn stats_view(props: &StatsProps) -> Html {
    let best = props.best_time.map_or_else(|| "--".to_string(), format_time);

    html! {
        <nav class="stats">
            <aside>{"Time "}{format_time(props.elapsed_secs)}</aside>
            <aside>{"Best "}{best}</aside>
            <aside>{props.total_tiles}{" tiles"}</aside>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ControlsProps {
    pub config: game::GameConfig,
    pub in_progress: bool,
    pub on_grid_size: Callback<game::GridSize>,
    pub on_mode: Callback<game::TileMode>,
    pub on_start: Callback<MouseEvent>,
}

#[function_component(ControlsView)]
pub(crate) fn controls_view(props: &ControlsProps) -> Html {
    let size_buttons = (game::MIN_GRID_SIZE..=game::MAX_GRID_SIZE).map(|n| {
        let on_grid_size = props.on_grid_size.clone();
        let selected = (props.config.grid_size == n).then_some("selected");
        html! {
            <button
                class={classes!(selected)}
                disabled={props.in_progress}
                onclick={Callback::from(move |_: MouseEvent| on_grid_size.emit(n))}
            >
                { format!("{n}\u{d7}{n}") }
            </button>
        }
    });

    let mode_buttons = [
        (game::TileMode::Photo, "Photos"),
        (game::TileMode::Number, "Numbers"),
    ]
    .map(|(mode, label)| {
        let on_mode = props.on_mode.clone();
        let selected = (props.config.mode == mode).then_some("selected");
        html! {
            <button
                class={classes!(selected)}
                disabled={props.in_progress}
                onclick={Callback::from(move |_: MouseEvent| on_mode.emit(mode))}
            >
                { label }
            </button>
        }
    });

    html! {
        <nav class="controls">
            <span class="sizes">{ for size_buttons }</span>
            <span class="modes">{ for mode_buttons.into_iter() }</span>
            <button class="start" onclick={props.on_start.clone()}>
                { if props.in_progress { "Restart" } else { "Start" } }
            </button>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct StatusProps {
    pub snapshot: game::Snapshot,
    #[prop_or_default]
    pub record: Option<game::BestTimeUpdate>,
}

#[function_component(StatusView)]
pub(crate) fn status_view(props: &StatusProps) -> Html {
    let result_class = props
        .snapshot
        .outcome
        .map(|outcome| if outcome.won { "win" } else { "lose" });

    html! {
        <p class={classes!("status", result_class)}>
            { status_line(&props.snapshot) }
            {
                for props.record.map(|update| html! {
                    <span class="record">{ record_line(update) }</span>
                })
            }
        </p>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct OrderComparisonProps {
    pub snapshot: game::Snapshot,
    pub on_close: Callback<MouseEvent>,
}

/// Side-by-side view of the memorized order and the clicked order after a
/// lost round, with the mismatch position marked.
#[function_component(OrderComparisonView)]
pub(crate) fn order_comparison_view(props: &OrderComparisonProps) -> Html {
    let snapshot = &props.snapshot;
    let mode = snapshot.config.mode;

    let cell = move |content: &game::TileContent| match mode {
        game::TileMode::Photo => html! {
            <img src={content.clone()} alt="tile" />
        },
        game::TileMode::Number => html! {
            <span>{content.clone()}</span>
        },
    };

    html! {
        <Modal>
            <dialog class="comparison" open={true}>
                <article>
                    <h2>{"Where it went wrong"}</h2>
                    <table>
                        <tr>
                            <th>{"Your order"}</th>
                            {
                                for snapshot.memorized_order.iter().map(|content| html! {
                                    <td>{ cell(content) }</td>
                                })
                            }
                        </tr>
                        <tr>
                            <th>{"You clicked"}</th>
                            {
                                for snapshot.recall_comparison().map(|(_expected, clicked, matched)| {
                                    html! {
                                        <td class={if matched { "ok" } else { "bad" }}>
                                            { cell(clicked) }
                                        </td>
                                    }
                                })
                            }
                        </tr>
                    </table>
                    <footer>
                        <button onclick={props.on_close.clone()}>{"Close"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}

#[function_component(RulesView)]
pub(crate) fn rules_view() -> Html {
    html! {
        <details class="rules">
            <summary>{"How to play"}</summary>
            <ol>
                <li>{"Start a game and click every tile once, in any order you like."}</li>
                <li>{"After the last click the tiles shuffle."}</li>
                <li>{"Click the same contents in the same order on the new layout."}</li>
                <li>{"One wrong click ends the round. Only a flawless, faster run sets a new record."}</li>
            </ol>
        </details>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(contents: &[&str]) -> game::GameEngine {
        let config = game::GameConfig::new(2, game::TileMode::Number);
        let tiles = contents
            .iter()
            .enumerate()
            .map(|(i, content)| game::Tile::new(format!("tile-{i}"), *content))
            .collect();
        let mut engine = game::GameEngine::new(config);
        engine.start(game::TileSet::new(config, tiles).unwrap());
        engine
    }

    #[test]
    fn status_line_tracks_memorize_progress() {
        let mut engine = engine_with(&["10", "11", "12", "13"]);
        engine.tile_activated("12").unwrap();

        let line = status_line(&game::Snapshot::from_engine(&engine));

        assert_eq!(line, "Memorize your order: 1/4");
    }

    #[test]
    fn status_line_reports_a_win_with_the_time() {
        let mut engine = engine_with(&["10", "11", "12", "13"]);
        for content in ["10", "11", "12", "13"] {
            engine.tile_activated(content).unwrap();
        }
        engine.begin_recall(3);
        for _ in 0..65 {
            engine.tick();
        }
        for content in ["10", "11", "12", "13"] {
            engine.tile_activated(content).unwrap();
        }

        let line = status_line(&game::Snapshot::from_engine(&engine));

        assert_eq!(line, "You won in 1:05!");
    }

    #[test]
    fn status_line_reports_the_mismatch_score() {
        let mut engine = engine_with(&["10", "11", "12", "13"]);
        for content in ["10", "11", "12", "13"] {
            engine.tile_activated(content).unwrap();
        }
        engine.begin_recall(3);
        engine.tile_activated("10").unwrap();
        engine.tile_activated("13").unwrap();

        let line = status_line(&game::Snapshot::from_engine(&engine));

        assert_eq!(line, "Wrong tile! 1 of 4 correct.");
    }

    #[test]
    fn record_lines_cover_every_update_kind() {
        assert_eq!(
            record_line(game::BestTimeUpdate::FirstRecord),
            "First clear at this size, time recorded!"
        );
        assert_eq!(
            record_line(game::BestTimeUpdate::Improved { previous: 70 }),
            "New best time! Previous was 1:10."
        );
        assert_eq!(
            record_line(game::BestTimeUpdate::NotImproved { best: 59 }),
            "The record at this size remains 0:59."
        );
    }
}
