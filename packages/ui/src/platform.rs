//! Small wrappers over what differs between the browser and native builds.

use std::time::Duration;

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// The address the app was opened at. Native builds have none.
pub(crate) fn current_href() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().href().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Swap the address bar URL without reloading or adding a history entry.
pub(crate) fn replace_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let history = web_sys::window().and_then(|w| w.history().ok());
        if let Some(history) = history {
            if history
                .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
                .is_err()
            {
                tracing::warn!("Failed to clean up the address bar");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
    }
}
