//! Errors raised while talking to the hosted backend.

use reqwest::StatusCode;
use store::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response. `message` is the backend's own message.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The sign-in redirect carried an error instead of tokens.
    #[error("{0}")]
    Redirect(String),
}

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => RemoteError::with_status(status, message),
            ApiError::Http(ref e) => match e.status() {
                Some(status) => RemoteError::with_status(status.as_u16(), err.to_string()),
                None => RemoteError::new(err.to_string()),
            },
            other => RemoteError::new(other.to_string()),
        }
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Auth endpoints answer with `msg` or `error_description`, table endpoints
/// with `message`; anything else falls back to the raw body or the status text.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_table_error() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"tasks\""}"#;
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, body),
            "new row violates row-level security policy for table \"tasks\""
        );
    }

    #[test]
    fn test_message_from_auth_error() {
        let body = r#"{"code":429,"error_code":"over_email_send_rate_limit","msg":"email rate limit exceeded"}"#;
        assert_eq!(
            error_message(StatusCode::TOO_MANY_REQUESTS, body),
            "email rate limit exceeded"
        );
        let body = r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token: Refresh Token Not Found"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Invalid Refresh Token: Refresh Token Not Found"
        );
    }

    #[test]
    fn test_message_fallbacks() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }

    #[test]
    fn test_status_error_keeps_status() {
        let remote: RemoteError = ApiError::Status {
            status: 403,
            message: "permission denied".to_string(),
        }
        .into();
        assert_eq!(remote.status, Some(403));
        assert_eq!(remote.message, "permission denied");
    }
}
