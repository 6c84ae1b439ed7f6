use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use simonito_core::{HighScores, Score, StoreError};

/// Types that live under a fixed LocalStorage key.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

pub(crate) trait LocalOrDefault: Sized {
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
            log::error!("could not save {}: {:?}", T::KEY, err);
        }
    }
}

/// High-score persistence backed by the browser's LocalStorage. The value is
/// stored as a base-10 JSON integer.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BrowserScores;

impl BrowserScores {
    const KEY: &'static str = "simonito:high-score";
}

impl HighScores for BrowserScores {
    fn load(&self) -> Result<Option<Score>, StoreError> {
        match LocalStorage::get(Self::KEY) {
            Ok(best) => Ok(Some(best)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => {
                log::warn!("stored high score is unreadable: {:?}", err);
                Err(StoreError::Corrupt)
            }
            Err(err) => {
                log::warn!("high score storage unavailable: {:?}", err);
                Err(StoreError::Unavailable)
            }
        }
    }

    fn save(&mut self, value: Score) -> Result<(), StoreError> {
        LocalStorage::set(Self::KEY, value).map_err(|err| {
            log::error!("could not save high score: {:?}", err);
            StoreError::Unavailable
        })
    }
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
