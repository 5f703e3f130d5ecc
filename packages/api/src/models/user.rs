//! # Auth service response models
//!
//! [`AuthUser`] is the subset of the auth service's user object the client needs:
//! its id (which becomes the [`UserId`] that owns tasks) and email.
//!
//! [`TokenResponse`] is what the token endpoint returns when a session is
//! refreshed. [`TokenResponse::into_session`] turns it into the cached
//! [`Session`], computing the absolute expiry from `expires_in` when the
//! backend does not send `expires_at`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use store::{Session, UserId};

use crate::error::ApiError;

/// User object returned by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id.clone())
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Result<Session, ApiError> {
        let expires_at = match self.expires_at.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
            Some(at) => at,
            None => expiry_after(now, self.expires_in).ok_or_else(|| {
                ApiError::Decode(format!("expires_in out of range: {}", self.expires_in))
            })?,
        };
        Ok(build_session(
            self.access_token,
            self.refresh_token,
            expires_at,
            &self.user,
        ))
    }
}

/// `now + secs`, or `None` when the result is not a representable instant.
pub(crate) fn expiry_after(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(secs).and_then(|delta| now.checked_add_signed(delta))
}

pub(crate) fn build_session(
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
    user: &AuthUser,
) -> Session {
    Session {
        access_token,
        refresh_token,
        user_id: user.user_id(),
        email: user.email.clone(),
        expires_at,
    }
}
