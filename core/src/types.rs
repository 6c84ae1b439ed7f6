use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Count type used for round scores and persisted bests.
pub type Score = u32;

/// The four pads of the classic game. The set is fixed at compile time, so
/// every per-color table in the codebase is an exhaustive match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Green,
    Red,
    Yellow,
    Blue,
}

impl Color {
    pub const COUNT: usize = 4;

    pub const ALL: [Color; Color::COUNT] = [Color::Green, Color::Red, Color::Yellow, Color::Blue];

    /// Uniform independent draw. Repeats are allowed, matching the classic
    /// game's behavior.
    pub fn sample<R: rand::RngExt + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::COUNT)]
    }
}

/// A logical tone request handed to the tone player, fire-and-forget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// The tone of a single pad, both during playback and on player taps.
    Pad(Color),
    /// The longer buzz played when the round is lost.
    Failure,
}

impl Cue {
    pub const fn duration(self) -> Duration {
        match self {
            Self::Pad(_) => Duration::from_millis(400),
            Self::Failure => Duration::from_millis(800),
        }
    }
}
