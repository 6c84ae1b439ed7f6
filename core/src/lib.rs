#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use store::*;
pub use types::*;

mod engine;
mod store;
mod types;

/// Pacing of a game session. All delays are injectable so tests can run
/// without wall-clock waiting and platforms can retune the feel.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Pause before the first pad of a playback pass lights up.
    pub initial_delay: Duration,
    /// How long each pad stays lit during playback.
    pub hold: Duration,
    /// Dark gap between two pads during playback.
    pub gap: Duration,
    /// Pause between completing a round and replaying the grown sequence.
    pub win_pause: Duration,
}

impl GameConfig {
    pub const fn new(
        initial_delay: Duration,
        hold: Duration,
        gap: Duration,
        win_pause: Duration,
    ) -> Self {
        Self {
            initial_delay,
            hold,
            gap,
            win_pause,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(300),
            Duration::from_millis(600),
            Duration::from_millis(100),
            Duration::from_millis(1000),
        )
    }
}
