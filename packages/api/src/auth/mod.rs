//! # Authentication against the hosted auth service
//!
//! Passwordless sign-in: the user asks for a magic link by email, clicks it, and
//! comes back to the app with tokens in the URL fragment. From then on the
//! session is cached (see [`SessionCache`]) and refreshed shortly before it
//! expires.
//!
//! ## Endpoints
//!
//! | Method | Request |
//! |--------|---------|
//! | [`send_sign_in_link`](SupabaseClient::send_sign_in_link) | `POST /auth/v1/otp?redirect_to=…` |
//! | [`fetch_user`](SupabaseClient::fetch_user) | `GET /auth/v1/user` |
//! | [`refresh`](SupabaseClient::refresh) | `POST /auth/v1/token?grant_type=refresh_token` |
//! | [`logout`](SupabaseClient::logout) | `POST /auth/v1/logout` |
//!
//! ## Session change events
//!
//! Every change of the cached session is announced to the listeners registered
//! through `AuthService::on_session_change`:
//!
//! - [`complete_sign_in`](SupabaseClient::complete_sign_in) → `SIGNED_IN`
//! - [`current_session`](SupabaseClient::current_session) → `TOKEN_REFRESHED`
//!   after a refresh, `SIGNED_OUT` when an expired session could not be
//!   refreshed, and `SIGNED_IN` / `SIGNED_OUT` when another tab changed the
//!   cached session since we last looked.
//! - [`logout`](SupabaseClient::logout) → `SIGNED_OUT`, even if the remote
//!   revocation failed.

mod redirect;
mod session;

pub use redirect::{parse_redirect, strip_fragment, RedirectTokens};
pub use session::{SessionCache, SESSION_STORAGE_KEY};

use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use store::{AuthEvent, Session};

use crate::error::ApiError;
use crate::models::{build_session, expiry_after, AuthUser, TokenResponse};
use crate::{check, decode, SupabaseClient};

impl SupabaseClient {
    /// Ask the auth service to email a sign-in link to `email`.
    pub async fn send_sign_in_link(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/auth/v1/otp")
            .query(&[("redirect_to", self.config().redirect_url.as_str())])
            .json(&json!({ "email": email.trim(), "create_user": true }))
            .send()
            .await?;
        check(response).await?;
        tracing::info!("Sign-in link requested");
        Ok(())
    }

    /// Resolve the user an access token belongs to.
    pub async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        let response = self
            .request(Method::GET, "/auth/v1/user")
            .bearer_auth(access_token)
            .send()
            .await?;
        decode(response).await
    }

    /// Exchange a refresh token for a new session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, ApiError> {
        let response = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let token: TokenResponse = decode(response).await?;
        token.into_session(Utc::now())
    }

    /// Finish a magic-link sign-in from the URL the user landed on.
    ///
    /// Returns `Ok(None)` when `location` carries no sign-in tokens.
    pub async fn complete_sign_in(&self, location: &str) -> Result<Option<Session>, ApiError> {
        let Some(tokens) = parse_redirect(location)? else {
            return Ok(None);
        };
        let expires_at = expiry_after(Utc::now(), tokens.expires_in)
            .ok_or_else(|| ApiError::Redirect("sign-in link has an invalid expiry".to_string()))?;
        let user = self.fetch_user(&tokens.access_token).await?;
        let session = build_session(tokens.access_token, tokens.refresh_token, expires_at, &user);

        self.cache().store(&session);
        self.remember(Some(session.clone()));
        tracing::info!(user = %session.user_id, "User signed in successfully");
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(Some(session))
    }

    /// The cached session, refreshed if it is about to expire.
    pub async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        let cached = self.cache().load();
        self.notice_external_change(cached.as_ref());

        let Some(session) = cached else {
            return Ok(None);
        };
        let now = Utc::now();
        if !session.needs_refresh(now) {
            return Ok(Some(session));
        }

        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => {
                self.cache().store(&fresh);
                self.remember(Some(fresh.clone()));
                tracing::debug!(user = %fresh.user_id, "Session refreshed");
                self.emit(AuthEvent::TokenRefreshed, Some(fresh.clone()));
                Ok(Some(fresh))
            }
            Err(e) if session.is_expired(now) => {
                tracing::warn!("Session expired and could not be refreshed: {e}");
                self.cache().clear();
                self.remember(None);
                self.emit(AuthEvent::SignedOut, None);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Session refresh failed, keeping current token: {e}");
                Ok(Some(session))
            }
        }
    }

    /// Revoke the session remotely and forget it locally.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = match self.cache().load() {
            Some(session) => {
                let result = self
                    .request(Method::POST, "/auth/v1/logout")
                    .bearer_auth(&session.access_token)
                    .send()
                    .await;
                match result {
                    Ok(response) => check(response).await.map(|_| ()),
                    Err(e) => Err(ApiError::from(e)),
                }
            }
            None => Ok(()),
        };

        self.cache().clear();
        self.remember(None);
        tracing::info!("User signed out");
        self.emit(AuthEvent::SignedOut, None);

        if let Err(e) = &remote {
            tracing::warn!("Remote sign-out failed: {e}");
        }
        remote
    }

    /// Announce changes made to the cache by someone else (another tab).
    fn notice_external_change(&self, cached: Option<&Session>) {
        let last = self.last_seen();
        let event = match (last.as_ref(), cached) {
            (None, None) => None,
            (None, Some(_)) => Some(AuthEvent::SignedIn),
            (Some(_), None) => Some(AuthEvent::SignedOut),
            (Some(a), Some(b)) if a.user_id != b.user_id => Some(AuthEvent::SignedIn),
            (Some(a), Some(b)) if a.access_token != b.access_token => {
                Some(AuthEvent::TokenRefreshed)
            }
            (Some(_), Some(_)) => None,
        };

        if let Some(event) = event {
            tracing::info!(%event, "Session changed outside this tab");
            self.remember(cached.cloned());
            self.emit(event, cached.cloned());
        }
    }
}
