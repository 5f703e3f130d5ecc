use std::time::Duration;

use dioxus::prelude::*;
use store::media::embed_url;
use store::workout::{BodyPart, Workout};

use crate::icons::{FaMusic, FaPlay, FaStop};
use crate::platform::sleep;
use crate::Icon;
use crate::{notify, use_notifications, use_now_playing, Level, MusicEmbed, NowPlaying};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Workout stopwatch per body part, next to the music centre.
#[component]
pub fn GymView() -> Element {
    let mut notifications = use_notifications();
    let NowPlaying(mut now_playing) = use_now_playing();
    let mut workout = use_signal(Workout::new);
    let mut link = use_signal(String::new);

    use_future(move || async move {
        loop {
            sleep(Duration::from_secs(1)).await;
            if workout.peek().is_tracking() {
                workout.write().tick();
            }
        }
    });

    let load_music = move |_| match embed_url(&link()) {
        Ok(url) => {
            tracing::info!(%url, "Loading music");
            now_playing.set(Some(url));
        }
        Err(e) => notify(&mut notifications, Level::Warning, &e.to_string()),
    };

    let state = workout.read().clone();
    let clock = state.clock();
    let start_label = state.start_label();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "gym-view",
            header {
                h1 { "Gym Tracker" }
                p { class: "muted", "Track your sets and stay in the zone." }
            }

            div {
                class: "gym-grid",
                div {
                    class: "card",
                    div {
                        class: "body-parts",
                        for part in BodyPart::ALL {
                            button {
                                key: "{part}",
                                class: if part == state.part() { "chip active" } else { "chip" },
                                onclick: move |_| workout.write().select(part),
                                "{part}"
                            }
                        }
                    }

                    div { class: "workout-clock", "{clock}" }

                    if state.is_tracking() {
                        button {
                            class: "wide danger",
                            onclick: move |_| workout.write().stop(),
                            Icon { icon: FaStop, width: 20, height: 20 }
                            " STOP WORKOUT"
                        }
                    } else {
                        button {
                            class: "wide primary",
                            onclick: move |_| workout.write().start(),
                            Icon { icon: FaPlay, width: 20, height: 20 }
                            " {start_label}"
                        }
                    }
                }

                div {
                    class: "music-center",
                    div {
                        class: "music-title",
                        Icon { icon: FaMusic, width: 20, height: 20 }
                        span { "Music Center" }
                    }
                    div {
                        class: "music-form",
                        input {
                            r#type: "text",
                            placeholder: "Paste Spotify or YT Music Link...",
                            value: "{link}",
                            oninput: move |e| link.set(e.value()),
                        }
                        button { class: "primary", onclick: load_music, "Load" }
                    }
                    MusicEmbed {}
                }
            }
        }
    }
}
