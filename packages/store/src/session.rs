//! # Session store — who is logged in
//!
//! [`SessionStore`] is the single source of truth for the current [`Session`].
//! It is written only by the subscription it holds on the external
//! [`AuthService`] (see [`SessionStore::connect`]) and by the initial fetch
//! ([`SessionStore::initialize`]); everything else reads it through
//! [`SessionStore::current`] or listens with [`SessionStore::subscribe`].
//!
//! ## Lifecycle
//!
//! 1. `connect(&auth)` registers exactly one handler with the auth service.
//!    Further calls are ignored while connected.
//! 2. `initialize(&auth)` fetches the current session once and publishes it as
//!    [`AuthEvent::InitialSession`]. Until then `current()` is `None`.
//! 3. Every change reported by the auth service replaces the cached session and
//!    is forwarded to subscribers in the order it was emitted.
//! 4. `disconnect()` (or dropping the last clone of the store) releases the
//!    upstream subscription.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::error::RemoteError;
use crate::models::{AuthEvent, Session, UserId};
use crate::observer::{Observers, Subscription};

/// A session change as reported by the auth service.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl SessionChange {
    pub fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }
}

/// Async interface to the hosted authentication service.
pub trait AuthService {
    /// Send a passwordless sign-in link to `email`.
    fn request_sign_in_link(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    /// The service's current session, if any.
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>, RemoteError>>;

    /// Register a handler for every authentication lifecycle event.
    fn on_session_change(&self, handler: impl Fn(&SessionChange) + 'static) -> Subscription;

    fn sign_out(&self) -> impl Future<Output = Result<(), RemoteError>>;
}

struct Inner {
    current: RefCell<Option<Session>>,
    observers: Observers<SessionChange>,
    upstream: RefCell<Option<Subscription>>,
}

/// Shared handle to the process-wide session state. Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                current: RefCell::new(None),
                observers: Observers::new(),
                upstream: RefCell::new(None),
            }),
        }
    }

    /// The cached session, or `None` when signed out or not yet resolved.
    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|s| s.user_id.clone())
    }

    /// Listen for session changes. Cancel with the returned handle.
    pub fn subscribe(&self, handler: impl Fn(&SessionChange) + 'static) -> Subscription {
        self.inner.observers.subscribe(handler)
    }

    /// Subscribe to `auth`. Returns `false` if a subscription already exists.
    pub fn connect<A: AuthService>(&self, auth: &A) -> bool {
        if self.is_connected() {
            tracing::warn!("Session store is already connected to the auth service");
            return false;
        }

        let inner: Weak<Inner> = Rc::downgrade(&self.inner);
        let upstream = auth.on_session_change(move |change| {
            if let Some(inner) = inner.upgrade() {
                SessionStore { inner }.publish(change.clone());
            }
        });
        *self.inner.upstream.borrow_mut() = Some(upstream);
        true
    }

    /// Release the auth service subscription. Safe to call repeatedly.
    pub fn disconnect(&self) {
        let upstream = self.inner.upstream.borrow_mut().take();
        if let Some(upstream) = upstream {
            upstream.unsubscribe();
            tracing::debug!("Session store disconnected from the auth service");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.inner.upstream.borrow().is_some()
    }

    /// Fetch the initial session and publish it as [`AuthEvent::InitialSession`].
    pub async fn initialize<A: AuthService>(
        &self,
        auth: &A,
    ) -> Result<Option<Session>, RemoteError> {
        let session = auth.get_session().await?;
        self.publish(SessionChange::new(AuthEvent::InitialSession, session.clone()));
        Ok(session)
    }

    fn publish(&self, change: SessionChange) {
        match &change.session {
            Some(session) => {
                tracing::info!(event = %change.event, user = %session.user_id, "Session changed")
            }
            None => tracing::info!(event = %change.event, "Session cleared"),
        }
        *self.inner.current.borrow_mut() = change.session.clone();
        self.inner.observers.emit(&change);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.inner.current.borrow())
            .field("connected", &self.is_connected())
            .finish()
    }
}
