//! # Domain models for sessions and tasks
//!
//! Defines the data that crosses the boundary between the client and the hosted
//! backend. Every type is `Serialize + Deserialize` so the `api` crate can decode
//! backend rows and auth responses straight into them.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Session`] | The cached, read-only copy of the backend's session: access and refresh tokens, the user it belongs to, and when it expires. |
//! | [`Task`] | One row of the remote `tasks` table. `id` and `created_at` are assigned by the backend. |
//! | [`NewTask`] | The insert payload. The owner is always sent explicitly, the backend never infers it. |
//! | [`UserId`] | Opaque user identifier issued by the auth service. |
//! | [`AuthEvent`] | The lifecycle events the auth service reports alongside a session change. |

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
pub type TaskId = i64;

/// Seconds before expiry at which a session should be refreshed.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Identifier of an authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated identity bound to this client.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the access token is no longer valid at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the access token is expired or about to expire at `now`.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) >= self.expires_at
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// A row of the remote `tasks` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `tasks` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub is_completed: bool,
    pub user_id: UserId,
}

impl NewTask {
    pub fn new(title: impl Into<String>, owner: &UserId) -> Self {
        Self {
            title: title.into(),
            is_completed: false,
            user_id: owner.clone(),
        }
    }
}

/// Authentication lifecycle events, named the way the auth service reports them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuthEvent::InitialSession => "INITIAL_SESSION",
            AuthEvent::SignedIn => "SIGNED_IN",
            AuthEvent::SignedOut => "SIGNED_OUT",
            AuthEvent::TokenRefreshed => "TOKEN_REFRESHED",
            AuthEvent::UserUpdated => "USER_UPDATED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            user_id: UserId::new("u1"),
            email: None,
            expires_at,
        }
    }

    #[test]
    fn test_session_expiry_and_refresh_margin() {
        let now = Utc::now();
        let fresh = session_expiring_at(now + Duration::hours(1));
        assert!(!fresh.is_expired(now));
        assert!(!fresh.needs_refresh(now));

        let soon = session_expiring_at(now + Duration::seconds(30));
        assert!(!soon.is_expired(now));
        assert!(soon.needs_refresh(now));

        let gone = session_expiring_at(now - Duration::seconds(1));
        assert!(gone.is_expired(now));
        assert!(gone.needs_refresh(now));
    }

    #[test]
    fn test_session_debug_hides_tokens() {
        let session = session_expiring_at(Utc::now());
        let printed = format!("{session:?}");
        assert!(printed.contains("u1"));
        assert!(!printed.contains("access"));
        assert!(!printed.contains("refresh"));
    }

    #[test]
    fn test_task_row_decodes_from_backend_json() {
        let row = r#"{
            "id": 7,
            "title": "Stretch",
            "is_completed": true,
            "user_id": "8d0f",
            "created_at": "2024-05-01T10:00:00+00:00"
        }"#;
        let task: Task = serde_json::from_str(row).unwrap();
        assert_eq!(task.id, 7);
        assert!(task.is_completed);
        assert_eq!(task.user_id, UserId::new("8d0f"));
    }

    #[test]
    fn test_new_task_carries_owner_and_starts_open() {
        let owner = UserId::new("owner-1");
        let payload = serde_json::to_value(NewTask::new("Buy milk", &owner)).unwrap();
        assert_eq!(payload["user_id"], "owner-1");
        assert_eq!(payload["is_completed"], false);
        assert_eq!(payload["title"], "Buy milk");
    }

    #[test]
    fn test_auth_event_wire_names() {
        let json = serde_json::to_string(&AuthEvent::TokenRefreshed).unwrap();
        assert_eq!(json, "\"TOKEN_REFRESHED\"");
        assert_eq!(AuthEvent::SignedIn.to_string(), "SIGNED_IN");
    }
}
