//! # API crate — client for the hosted Zenflow backend
//!
//! The app has no server of its own. Authentication and the `tasks` table both
//! live on a hosted Supabase project, and this crate is the only code that
//! talks to it over HTTP. It plugs into the `store` crate through the
//! [`store::AuthService`] and [`store::TaskTable`] traits, so everything above
//! it (session store, task repository, UI) is backend-agnostic.
//!
//! ## Modules
//!
//! | Module | Target | Purpose |
//! |--------|--------|---------|
//! | [`auth`] | all | Magic-link sign-in, session cache, refresh, sign-out |
//! | [`config`] | all | [`BackendConfig`] from environment variables (runtime on native, build time on web) |
//! | [`error`] | all | [`ApiError`] and its mapping to [`store::RemoteError`] |
//! | [`models`] | all | Auth service response types |
//! | `rest` | all | `tasks` table calls |
//!
//! ## Request headers
//!
//! Every request carries the project's anon key in `apikey`. Table requests
//! and user lookups add `Authorization: Bearer <access token>`, so the
//! backend's row-level policy applies to the signed-in user.

use std::cell::RefCell;
use std::rc::Rc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use store::{
    AuthEvent, AuthService, NewTask, Observers, RemoteError, Session, SessionChange,
    Subscription, Task, TaskId, TaskTable,
};

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
mod rest;

pub use auth::SessionCache;
pub use config::BackendConfig;
pub use error::ApiError;
pub use models::{AuthUser, TokenResponse};

struct ClientInner {
    config: BackendConfig,
    http: reqwest::Client,
    cache: SessionCache,
    listeners: Observers<SessionChange>,
    /// The session as of our last look at the cache.
    last_seen: RefCell<Option<Session>>,
}

/// Handle to the hosted backend. Clones share the HTTP client, session cache
/// and listeners.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Rc<ClientInner>,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_cache(config, SessionCache::new())
    }

    /// Build a client around an existing session cache.
    pub fn with_cache(config: BackendConfig, cache: SessionCache) -> Self {
        let last_seen = cache.load();
        Self {
            inner: Rc::new(ClientInner {
                config,
                http: reqwest::Client::new(),
                cache,
                listeners: Observers::new(),
                last_seen: RefCell::new(last_seen),
            }),
        }
    }

    /// Client configured from [`BackendConfig::from_env`].
    pub fn from_env() -> Result<Self, ApiError> {
        let config = BackendConfig::from_env()?;
        tracing::info!(url = %config.url, "Backend configured");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &BackendConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &SessionCache {
        &self.inner.cache
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .http
            .request(method, self.inner.config.endpoint(path))
            .header("apikey", &self.inner.config.anon_key)
    }

    fn authed(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        self.request(method, path).bearer_auth(&session.access_token)
    }

    fn last_seen(&self) -> Option<Session> {
        self.inner.last_seen.borrow().clone()
    }

    fn remember(&self, session: Option<Session>) {
        *self.inner.last_seen.borrow_mut() = session;
    }

    fn emit(&self, event: AuthEvent, session: Option<Session>) {
        self.inner.listeners.emit(&SessionChange::new(event, session));
    }
}

/// Turn a non-2xx response into [`ApiError::Status`].
pub(crate) async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error::error_message(status, &body);
    tracing::debug!(status = status.as_u16(), "Backend rejected request: {message}");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = check(response).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl AuthService for SupabaseClient {
    async fn request_sign_in_link(&self, email: &str) -> Result<(), RemoteError> {
        Ok(self.send_sign_in_link(email).await?)
    }

    async fn get_session(&self) -> Result<Option<Session>, RemoteError> {
        Ok(self.current_session().await?)
    }

    fn on_session_change(&self, handler: impl Fn(&SessionChange) + 'static) -> Subscription {
        self.inner.listeners.subscribe(handler)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        Ok(self.logout().await?)
    }
}

impl TaskTable for SupabaseClient {
    async fn select_all(&self, session: &Session) -> Result<Vec<Task>, RemoteError> {
        Ok(self.fetch_tasks(session).await?)
    }

    async fn insert(&self, session: &Session, task: &NewTask) -> Result<Task, RemoteError> {
        Ok(self.insert_task(session, task).await?)
    }

    async fn update_completed(
        &self,
        session: &Session,
        id: TaskId,
        completed: bool,
    ) -> Result<(), RemoteError> {
        Ok(self.update_task_completed(session, id, completed).await?)
    }

    async fn delete(&self, session: &Session, id: TaskId) -> Result<(), RemoteError> {
        Ok(self.delete_task(session, id).await?)
    }
}
