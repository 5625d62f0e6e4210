use gloo::storage::{LocalStorage, Storage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use yew::prelude::*;

/// Namespaced local-storage key for one persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault {
    /// Loads the stored value, falling back to the default when nothing was
    /// stored yet or the stored shape no longer parses.
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {:?}", T::KEY, err);
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Formats whole seconds as `m:ss` for the stats row.
pub(crate) fn format_time(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{mins}:{secs:02}")
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Marker {
        count: u32,
    }

    impl StorageKey for Marker {
        const KEY: &'static str = "memogrid:test-marker";
    }

    #[wasm_bindgen_test]
    fn local_save_round_trips() {
        Marker { count: 7 }.local_save();

        let restored: Marker = LocalOrDefault::local_or_default();

        assert_eq!(restored, Marker { count: 7 });
    }

    #[wasm_bindgen_test]
    fn missing_value_falls_back_to_default() {
        LocalStorage::delete(Marker::KEY);

        let restored: Marker = LocalOrDefault::local_or_default();

        assert_eq!(restored, Marker::default());
    }
}
