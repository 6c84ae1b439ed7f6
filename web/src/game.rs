use core::time::Duration;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::audio::TonePlayer;
use crate::settings::{Settings, SettingsView};
use crate::storage::*;
use simonito_core::{Color, Cue, Effect, Effects, GameConfig, Phase, RoundEngine, Timer};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    NewGame,
    Pad(Color),
    Timer(Timer),
    ToggleSettings,
    UpdateSettings(Settings),
}

const fn pad_class(color: Color) -> &'static str {
    match color {
        Color::Green => "green",
        Color::Red => "red",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
    }
}

fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

fn haptic_buzz(duration: Duration) {
    // cosmetic feedback, silently unsupported on desktop browsers
    let _ = gloo::utils::window()
        .navigator()
        .vibrate_with_duration(duration.as_millis() as u32);
}

#[derive(Properties, Clone, PartialEq)]
struct PadProps {
    color: Color,
    #[prop_or_default]
    lit: bool,
    #[prop_or_default]
    enabled: bool,
    callback: Callback<Color>,
}

#[function_component(Pad)]
fn pad_component(props: &PadProps) -> Html {
    let PadProps {
        color,
        lit,
        enabled,
        callback,
    } = props.clone();

    let class = classes!(
        "pad",
        pad_class(color),
        lit.then_some("lit"),
        (!enabled).then_some("disabled"),
    );
    let onmousedown = Callback::from(move |_: MouseEvent| {
        log::trace!("{:?} pad pressed", color);
        callback.emit(color);
    });

    html! {
        <td {class} {onmousedown}/>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Forced RNG seed, for reproducing games.
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    engine: RoundEngine<BrowserScores>,
    audio: Option<TonePlayer>,
    settings: Settings,
    settings_open: bool,
}

impl GameView {
    /// Carries out what the engine asked for: tones now, timer tokens later.
    /// Timeout handles are dropped on purpose; a token from a superseded game
    /// is inert engine-side.
    fn apply_effects(&mut self, ctx: &Context<Self>, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::PlayTone(cue) => {
                    if self.settings.sound {
                        if let Some(audio) = &self.audio {
                            audio.play(cue);
                        }
                    }
                    if cue == Cue::Failure {
                        haptic_buzz(cue.duration());
                    }
                }
                Effect::Schedule(after, timer) => {
                    let link = ctx.link().clone();
                    Timeout::new(after.as_millis() as u32, move || {
                        link.send_message(Msg::Timer(timer))
                    })
                    .forget();
                }
            }
        }
    }

    fn ensure_audio(&mut self) {
        if self.audio.is_none() {
            match TonePlayer::new() {
                Ok(player) => self.audio = Some(player),
                Err(err) => log::error!("audio unavailable: {:?}", err),
            }
        }
    }

    fn phase_class(&self) -> Classes {
        use Phase::*;
        classes!(match self.engine.phase() {
            Idle => "idle",
            Playback => "playback",
            PlayerTurn => "player-turn",
            GameOver => "game-over",
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        Self {
            engine: RoundEngine::new(GameConfig::default(), seed, BrowserScores),
            audio: None,
            settings: LocalOrDefault::local_or_default(),
            settings_open: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::NewGame => {
                // the click counts as the user gesture audio needs
                self.ensure_audio();
                let effects = self.engine.start_game();
                self.apply_effects(ctx, effects);
                true
            }
            Msg::Pad(color) => {
                let (outcome, effects) = self.engine.tap(color);
                self.apply_effects(ctx, effects);
                outcome.has_update()
            }
            Msg::Timer(timer) => {
                let effects = self.engine.timer_fired(timer);
                self.apply_effects(ctx, effects);
                true
            }
            Msg::ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            Msg::UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.engine.snapshot();
        let score = format_for_counter(snapshot.score);
        let best = format_for_counter(snapshot.high_score);
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let cb_show_settings = ctx.link().callback(|_: MouseEvent| Msg::ToggleSettings);
        let cb_pad = ctx.link().callback(Msg::Pad);
        let enabled = snapshot.phase.accepts_input();
        let game_over = snapshot.phase.is_over();

        html! {
            <div class="simonito" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside>{score}</aside>
                    <span><button class={self.phase_class()} onclick={cb_new_game}/></span>
                    <aside>{best}</aside>
                </nav>
                <table>
                    {
                        for Color::ALL.chunks(2).map(|row| html! {
                            <tr>
                                {
                                    for row.iter().map(|&color| {
                                        let lit = snapshot.active == Some(color);
                                        let callback = cb_pad.clone();
                                        html! {
                                            <Pad {color} {lit} {enabled} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                {
                    game_over.then(|| html! {
                        <p class="game-over-banner" onclick={ctx.link().callback(|_: MouseEvent| Msg::NewGame)}>
                            {"Game over, tap to play again"}
                        </p>
                    })
                }
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings}
                    on_change={ctx.link().callback(Msg::UpdateSettings)}
                    on_close={ctx.link().callback(|_| Msg::ToggleSettings)}
                />
            </div>
        }
    }
}
