//! Background music for the focus timer.

use std::time::Duration;

use store::pomodoro::{FadeOut, MusicCommand};

use crate::platform::sleep;

/// Looping audio track driven by [`MusicCommand`]s.
///
/// Backed by an `HtmlAudioElement` on the web. Native builds only log.
#[derive(Clone)]
pub struct FocusMusic {
    #[cfg(target_arch = "wasm32")]
    element: Option<web_sys::HtmlAudioElement>,
}

impl FocusMusic {
    pub fn new(src: &str) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let element = match web_sys::HtmlAudioElement::new_with_src(src) {
                Ok(element) => {
                    element.set_loop(true);
                    Some(element)
                }
                Err(_) => {
                    tracing::warn!(src, "Could not create audio element");
                    None
                }
            };
            Self { element }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::debug!(src, "Audio playback is only available on the web");
            Self {}
        }
    }

    /// Carry out `command`. A fade-out lowers the volume one step per
    /// `fade_step`, then pauses and restores full volume.
    pub async fn perform(&self, command: MusicCommand, fade_step: Duration) {
        match command {
            MusicCommand::Play => self.play().await,
            MusicCommand::Pause => self.pause(),
            MusicCommand::Rewind => {
                self.pause();
                self.seek_start();
            }
            MusicCommand::FadeOut => {
                for volume in FadeOut::default() {
                    self.set_volume(volume);
                    sleep(fade_step).await;
                }
                self.pause();
                self.set_volume(1.0);
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn play(&self) {
        let Some(element) = &self.element else {
            return;
        };
        match element.play() {
            // Autoplay policies reject the promise until the user has interacted.
            Ok(promise) => {
                if let Err(reason) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    tracing::warn!(?reason, "Audio play blocked");
                }
            }
            Err(reason) => tracing::warn!(?reason, "Audio play failed"),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn pause(&self) {
        if let Some(element) = &self.element {
            if let Err(reason) = element.pause() {
                tracing::warn!(?reason, "Audio pause failed");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn seek_start(&self) {
        if let Some(element) = &self.element {
            element.set_current_time(0.0);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn set_volume(&self, volume: f64) {
        if let Some(element) = &self.element {
            element.set_volume(volume);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn play(&self) {
        tracing::debug!("music: play");
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn pause(&self) {
        tracing::debug!("music: pause");
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn seek_start(&self) {
        tracing::debug!("music: rewind");
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set_volume(&self, volume: f64) {
        tracing::trace!(volume, "music: volume");
    }
}
