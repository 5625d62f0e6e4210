use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::utils::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "memogrid:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let settings = props.settings;

    let toggle_sound = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: Event| {
            on_change.emit(Settings {
                sound_enabled: !settings.sound_enabled,
            });
        })
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <label>
                    <input
                        type="checkbox"
                        checked={settings.sound_enabled}
                        onchange={toggle_sound}
                    />
                    {"Sound effects"}
                </label>
                <footer>
                    <button onclick={props.on_close.clone()}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}
