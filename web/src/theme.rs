use crate::storage::*;
use serde::{Deserialize, Serialize};

/// Forced color scheme. `None` means following the system preference.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn update_html(theme: Option<Self>) {
        let html = gloo::utils::document_element();
        log::debug!("theme-scheme: {:?}", theme.map(Self::scheme));
        let result = match theme {
            Some(theme) => html.set_attribute(Self::ATTR_NAME, theme.scheme()),
            None => html.remove_attribute(Self::ATTR_NAME),
        };
        if let Err(err) = result {
            log::error!("failed to apply theme: {:?}", err);
        }
    }

    pub(crate) fn init() {
        Self::update_html(LocalOrDefault::local_or_default());
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "simonito:theme";
}
