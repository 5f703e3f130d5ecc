//! The embedded music player. Its link is app-level state, so the player keeps
//! its source while the user moves between views.

use dioxus::prelude::*;

use crate::icons::{FaMusic, FaXmark};
use crate::Icon;

/// Embed URL of the playlist or track currently loaded, if any.
#[derive(Clone, Copy, PartialEq)]
pub struct NowPlaying(pub Signal<Option<String>>);

pub fn use_now_playing() -> NowPlaying {
    use_context::<NowPlaying>()
}

#[component]
pub fn MusicProvider(children: Element) -> Element {
    use_context_provider(|| NowPlaying(Signal::new(None)));
    rsx! {
        {children}
    }
}

/// The player frame, or a hint when nothing is loaded.
#[component]
pub fn MusicEmbed() -> Element {
    let NowPlaying(mut url) = use_now_playing();

    match url() {
        Some(src) => rsx! {
            div {
                class: "music-embed",
                iframe {
                    src: "{src}",
                    width: "100%",
                    height: "100%",
                    allow: "autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture",
                    "loading": "lazy",
                    title: "Gym Playlist",
                }
                button {
                    class: "music-close",
                    title: "Close player",
                    onclick: move |_| url.set(None),
                    Icon { icon: FaXmark, width: 12, height: 12 }
                }
            }
        },
        None => rsx! {
            div {
                class: "music-embed empty",
                Icon { icon: FaMusic, width: 40, height: 40 }
                p { "Paste a link and click Load to see your playlist" }
            }
        },
    }
}
