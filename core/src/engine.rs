use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// No active game, nothing scheduled.
    Idle,
    /// The device is speaking the sequence; player input is ignored.
    Playback,
    /// Playback finished, taps are accepted one at a time.
    PlayerTurn,
    /// A mismatch happened; only `start_game` leads out of here.
    GameOver,
}

impl Phase {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::PlayerTurn)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Generation counter for scheduled timers. Every `start_game` bumps it,
/// which strands whatever the previous game still had pending.
pub type Epoch = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Step {
    PadOn(usize),
    PadOff(usize),
    NextRound,
}

/// Opaque token the driver hands back through [`RoundEngine::timer_fired`]
/// once the requested delay has elapsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    epoch: Epoch,
    step: Step,
}

/// What the driver has to do after a call into the engine. The engine never
/// touches real clocks or audio itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Effect {
    /// Hand the cue to the tone player, fire-and-forget.
    PlayTone(Cue),
    /// Call [`RoundEngine::timer_fired`] with the token after the delay.
    Schedule(Duration, Timer),
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Outcome of a single player tap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Ignored,
    Matched,
    RoundWon,
    Mismatch,
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Read-only view of the engine for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub sequence_len: usize,
    pub score: Score,
    pub high_score: Score,
    pub active: Option<Color>,
}

/// The round engine: owns the sequence, turn-taking, playback pacing and
/// win/loss detection.
///
/// Driving contract: every call returns [`Effects`]; the driver plays the
/// tones and arms one real timer per `Schedule`, feeding the token back in.
/// Timers scheduled before the latest `start_game` carry an older epoch and
/// are dropped, so a restart deterministically cancels a pending playback.
#[derive(Clone, Debug)]
pub struct RoundEngine<S> {
    config: GameConfig,
    rng: SmallRng,
    store: S,
    sequence: SmallVec<[Color; 32]>,
    /// Length of the correctly reproduced prefix of `sequence`. Any deviation
    /// ends the round on the spot, so this *is* the player's input.
    matched: usize,
    score: Score,
    high_score: Score,
    epoch: Epoch,
    active: Option<Color>,
    phase: Phase,
}

impl<S: HighScores> RoundEngine<S> {
    pub fn new(config: GameConfig, seed: u64, store: S) -> Self {
        let high_score = match store.load() {
            Ok(Some(best)) => best,
            Ok(None) => 0,
            Err(err) => {
                log::warn!("could not load high score, starting from 0: {}", err);
                0
            }
        };
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            store,
            sequence: SmallVec::new(),
            matched: 0,
            score: 0,
            high_score,
            epoch: 0,
            active: None,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    /// The pad currently lit during playback, if any.
    pub fn active(&self) -> Option<Color> {
        self.active
    }

    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            sequence_len: self.sequence.len(),
            score: self.score,
            high_score: self.high_score,
            active: self.active,
        }
    }

    /// Starts a fresh game from any phase. Pending timers of a previous game
    /// are stranded by the epoch bump.
    pub fn start_game(&mut self) -> Effects {
        self.epoch += 1;
        self.score = 0;
        self.matched = 0;
        self.active = None;
        self.sequence.clear();
        self.sequence.push(Color::sample(&mut self.rng));
        self.phase = Phase::Playback;
        log::debug!("new game, epoch {}", self.epoch);
        smallvec![Effect::Schedule(
            self.config.initial_delay,
            self.timer(Step::PadOn(0)),
        )]
    }

    /// A player tap. Outside of [`Phase::PlayerTurn`] this is a no-op, never
    /// an error: taps during playback must be dropped, not queued, so the
    /// player cannot bank inputs ahead of the cue.
    pub fn tap(&mut self, color: Color) -> (TapOutcome, Effects) {
        if !self.phase.accepts_input() {
            log::trace!("tap on {:?} ignored during {:?}", color, self.phase);
            return (TapOutcome::Ignored, Effects::new());
        }

        // The pad sounds before the answer is judged.
        let mut effects: Effects = smallvec![Effect::PlayTone(Cue::Pad(color))];

        if color != self.sequence[self.matched] {
            effects.push(Effect::PlayTone(Cue::Failure));
            self.end_game();
            return (TapOutcome::Mismatch, effects);
        }

        self.matched += 1;
        if self.matched == self.sequence.len() {
            self.score += 1;
            // Leave PlayerTurn right away so no tap can land between the
            // winning one and the replay.
            self.phase = Phase::Playback;
            effects.push(Effect::Schedule(
                self.config.win_pause,
                self.timer(Step::NextRound),
            ));
            (TapOutcome::RoundWon, effects)
        } else {
            (TapOutcome::Matched, effects)
        }
    }

    /// Callback for an elapsed [`Effect::Schedule`] token.
    pub fn timer_fired(&mut self, timer: Timer) -> Effects {
        if timer.epoch != self.epoch {
            log::trace!("dropping stale timer {:?}, current epoch {}", timer, self.epoch);
            return Effects::new();
        }
        if self.phase != Phase::Playback {
            log::warn!("timer {:?} fired during {:?}", timer, self.phase);
            return Effects::new();
        }

        match timer.step {
            Step::PadOn(index) => {
                let color = self.sequence[index];
                self.active = Some(color);
                smallvec![
                    Effect::PlayTone(Cue::Pad(color)),
                    Effect::Schedule(self.config.hold, self.timer(Step::PadOff(index))),
                ]
            }
            Step::PadOff(index) => {
                self.active = None;
                if index + 1 < self.sequence.len() {
                    smallvec![Effect::Schedule(
                        self.config.gap,
                        self.timer(Step::PadOn(index + 1)),
                    )]
                } else {
                    self.matched = 0;
                    self.phase = Phase::PlayerTurn;
                    Effects::new()
                }
            }
            Step::NextRound => {
                self.sequence.push(Color::sample(&mut self.rng));
                smallvec![Effect::Schedule(
                    self.config.initial_delay,
                    self.timer(Step::PadOn(0)),
                )]
            }
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.active = None;
        self.sequence.clear();
        self.matched = 0;
        // Score is compared at the moment of the mismatch.
        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(err) = self.store.save(self.score) {
                log::error!("could not persist high score: {}", err);
            }
        }
    }

    const fn timer(&self, step: Step) -> Timer {
        Timer {
            epoch: self.epoch,
            step,
        }
    }
}
