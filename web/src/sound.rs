use std::collections::HashMap;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

const DEFAULT_VOLUME: f64 = 0.5;

/// Audio cue for a game transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Cue {
    Click,
    Win,
    Lose,
}

impl Cue {
    const fn source(self) -> &'static str {
        use Cue::*;
        match self {
            Click => "sounds/click.mp3",
            Win => "sounds/win.mp3",
            Lose => "sounds/lose.mp3",
        }
    }
}

/// Fire-and-forget playback with one cached element per cue. Every failure
/// is logged and swallowed, playback never influences the game state.
#[derive(Default)]
pub(crate) struct SoundBank {
    cache: HashMap<Cue, HtmlAudioElement>,
}

impl SoundBank {
    pub(crate) fn play(&mut self, cue: Cue) {
        let Some(audio) = self.audio(cue) else {
            return;
        };

        audio.set_current_time(0.0);
        match audio.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if JsFuture::from(promise).await.is_err() {
                        log::debug!("{:?} sound did not play", cue);
                    }
                });
            }
            Err(err) => log::warn!("could not play {:?} sound: {:?}", cue, err),
        }
    }

    fn audio(&mut self, cue: Cue) -> Option<&HtmlAudioElement> {
        use std::collections::hash_map::Entry;

        match self.cache.entry(cue) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => match HtmlAudioElement::new_with_src(cue.source()) {
                Ok(audio) => {
                    audio.set_volume(DEFAULT_VOLUME);
                    Some(entry.insert(audio))
                }
                Err(err) => {
                    log::warn!("could not load {:?} sound: {:?}", cue, err);
                    None
                }
            },
        }
    }
}
