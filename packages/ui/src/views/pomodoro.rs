use std::time::Duration;

use dioxus::prelude::*;
use store::pomodoro::{MusicCommand, Phase, Pomodoro};
use store::TimerConfig;

use crate::audio::FocusMusic;
use crate::icons::{FaPause, FaPlay, FaRotateLeft, FaVolumeHigh, FaVolumeXmark};
use crate::platform::sleep;
use crate::Icon;
use crate::{notify, use_notifications, Level};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Served next to the app; not bundled.
const FOCUS_TRACK: &str = "/assets/piano-focus.mp3";

/// Focus/break timer with background piano music.
#[component]
pub fn PomodoroView(#[props(default)] config: TimerConfig) -> Element {
    let mut notifications = use_notifications();
    let fade_step = Duration::from_millis(u64::from(config.fade_step_ms));
    let mut timer = use_signal(move || Pomodoro::new(config));
    let music = use_hook(|| FocusMusic::new(FOCUS_TRACK));

    {
        let music = music.clone();
        use_drop(move || music.pause());
    }

    let play = {
        let music = music.clone();
        move |command: Option<MusicCommand>| {
            let Some(command) = command else {
                return;
            };
            let music = music.clone();
            spawn(async move {
                music.perform(command, fade_step).await;
                if command == MusicCommand::FadeOut {
                    timer.write().music_stopped();
                }
            });
        }
    };

    {
        let play = play.clone();
        use_future(move || {
            let play = play.clone();
            async move {
                loop {
                    sleep(Duration::from_secs(1)).await;
                    let finished = timer.write().tick();
                    if let Some(finished) = finished {
                        play(finished.music);
                        notify(&mut notifications, Level::Info, finished.message);
                    }
                }
            }
        });
    }

    let state = timer.read().clone();
    let phase = state.phase();
    let running = state.is_running();
    let music_on = state.is_music_playing();
    let display = state.display();
    let badge = match phase {
        Phase::Focus => format!("🧠 {}", phase.label()),
        Phase::Break => format!("☕ {}", phase.label()),
    };

    let toggle_timer = {
        let play = play.clone();
        move |_| {
            let command = timer.write().toggle();
            play(command);
        }
    };
    let reset_timer = {
        let play = play.clone();
        move |_| {
            let command = timer.write().reset();
            play(Some(command));
        }
    };
    let toggle_music = move |_| {
        let command = timer.write().toggle_music();
        play(Some(command));
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "pomodoro-view",
            div {
                class: match phase {
                    Phase::Focus => "phase-badge focus",
                    Phase::Break => "phase-badge break",
                },
                "{badge}"
            }

            div { class: "clock", "{display}" }

            button {
                class: if music_on { "music-toggle on" } else { "music-toggle" },
                onclick: toggle_music,
                if music_on {
                    Icon { icon: FaVolumeHigh, width: 18, height: 18 }
                } else {
                    Icon { icon: FaVolumeXmark, width: 18, height: 18 }
                }
                span { "Piano Focus Mode" }
            }

            div {
                class: "timer-controls",
                button {
                    class: "round primary",
                    title: if running { "Pause" } else { "Start" },
                    onclick: toggle_timer,
                    if running {
                        Icon { icon: FaPause, width: 40, height: 40 }
                    } else {
                        Icon { icon: FaPlay, width: 40, height: 40 }
                    }
                }
                button {
                    class: "round",
                    title: "Reset",
                    onclick: reset_timer,
                    Icon { icon: FaRotateLeft, width: 32, height: 32 }
                }
            }
        }
    }
}
