use simonito_core::{Color, Cue};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// Oscillator pitch for each pad, the classic frequencies.
const fn frequency(color: Color) -> f32 {
    match color {
        Color::Green => 415.3,
        Color::Red => 310.0,
        Color::Yellow => 252.0,
        Color::Blue => 209.0,
    }
}

/// Owns the audio session for one run of the app. Browsers only allow audio
/// after a user gesture, so this is created on the first game start and the
/// device handle is released again on drop.
pub(crate) struct TonePlayer {
    ctx: AudioContext,
}

impl TonePlayer {
    pub(crate) fn new() -> Result<Self, JsValue> {
        Ok(Self {
            ctx: AudioContext::new()?,
        })
    }

    /// Fire-and-forget: the engine never waits for audio completion.
    pub(crate) fn play(&self, cue: Cue) {
        if let Err(err) = self.play_inner(cue) {
            log::error!("could not play {:?}: {:?}", cue, err);
        }
    }

    fn play_inner(&self, cue: Cue) -> Result<(), JsValue> {
        let oscillator = self.ctx.create_oscillator()?;
        match cue {
            Cue::Pad(color) => {
                oscillator.set_type(OscillatorType::Sine);
                oscillator.frequency().set_value(frequency(color));
            }
            Cue::Failure => {
                oscillator.set_type(OscillatorType::Sawtooth);
                oscillator.frequency().set_value(110.0);
            }
        }

        let now = self.ctx.current_time();
        let end = now + cue.duration().as_secs_f64();
        let gain = self.ctx.create_gain()?;
        gain.gain().set_value(0.4);
        // short release so the tone does not end on a click
        gain.gain().set_target_at_time(0.0, end - 0.05, 0.02)?;

        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;
        oscillator.start()?;
        oscillator.stop_with_when(end)?;
        Ok(())
    }
}

impl Drop for TonePlayer {
    fn drop(&mut self) {
        if let Err(err) = self.ctx.close() {
            log::warn!("could not close audio context: {:?}", err);
        }
    }
}
