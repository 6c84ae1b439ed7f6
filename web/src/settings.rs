use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::storage::StorageKey;
use crate::theme::Theme;

/// Player preferences. Stored as a bare JSON bool so the key reads
/// "true"/"false" in storage.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Settings {
    pub(crate) sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound: true }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "simonito:sound";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let settings = props.settings;

    let toggle_sound = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: Event| {
            on_change.emit(Settings {
                sound: !settings.sound,
            })
        })
    };
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let switch_theme = |theme: Option<Theme>| {
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            Theme::apply(theme);
        })
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <label>
                    <input type="checkbox" checked={settings.sound} onchange={toggle_sound}/>
                    {"Sound"}
                </label>
                <ul>
                    <li><a href="#" onclick={switch_theme(None)}>{"Auto"}</a></li>
                    <li><a href="#" onclick={switch_theme(Some(Theme::Light))}>{"Light"}</a></li>
                    <li><a href="#" onclick={switch_theme(Some(Theme::Dark))}>{"Dark"}</a></li>
                </ul>
                <footer>
                    <button onclick={close}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}
