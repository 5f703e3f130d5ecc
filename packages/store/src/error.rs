//! Error taxonomy shared by the repository, the session store and the backends.

use thiserror::Error;

/// A failure reported by the hosted backend (network, row policy, bad response).
///
/// Displays as the backend's own message so it can be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Errors returned by [`crate::TaskRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// No active session when one was required.
    #[error("Session expired. Please log in again.")]
    AuthRequired,
    /// Rejected locally; never reaches the backend.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
