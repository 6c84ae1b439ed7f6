use crate::Score;
use thiserror::Error;

/// Key-value persistence for the best score, surviving process restarts.
///
/// The engine treats this as best-effort: a failed load behaves like an
/// absent value, a failed save is logged and never retried.
pub trait HighScores {
    fn load(&self) -> Result<Option<Score>, StoreError>;
    fn save(&mut self, value: Score) -> Result<(), StoreError>;
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("stored value is not a valid score")]
    Corrupt,
    #[error("backing storage is unavailable")]
    Unavailable,
}
