//! Persisted copy of the current session.
//!
//! On the web the session lives in `localStorage`, so it survives reloads and is
//! visible to every tab of the app. Native builds keep it in memory.

use store::Session;

/// `localStorage` key holding the serialised session.
pub const SESSION_STORAGE_KEY: &str = "zenflow.auth.session";

#[derive(Clone, Default)]
pub struct SessionCache {
    #[cfg(not(target_arch = "wasm32"))]
    memory: std::rc::Rc<std::cell::RefCell<Option<Session>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(SESSION_STORAGE_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unreadable cached session: {e}");
                None
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn store(&self, session: &Session) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, session will not persist");
            return;
        };
        match serde_json::to_string(session) {
            Ok(raw) => {
                if storage.set_item(SESSION_STORAGE_KEY, &raw).is_err() {
                    tracing::warn!("Failed to persist session");
                }
            }
            Err(e) => tracing::warn!("Failed to serialise session: {e}"),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn clear(&self) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, cached session not cleared");
            return;
        };
        if storage.remove_item(SESSION_STORAGE_KEY).is_err() {
            tracing::warn!("Failed to clear cached session, it may reappear on reload");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(&self) -> Option<Session> {
        self.memory.borrow().clone()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn store(&self, session: &Session) {
        *self.memory.borrow_mut() = Some(session.clone());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear(&self) {
        *self.memory.borrow_mut() = None;
    }
}
