//! Parsing of the magic-link redirect.
//!
//! After the user clicks the emailed link, the auth service redirects back to
//! the app with the tokens in the URL fragment:
//!
//! ```text
//! https://app.example/#access_token=...&expires_in=3600&refresh_token=...&token_type=bearer&type=magiclink
//! ```
//!
//! A failed or expired link carries `error` / `error_description` instead, in
//! the fragment or the query string.

use chrono::Duration;
use url::Url;

use crate::error::ApiError;

/// Tokens carried by a successful sign-in redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Extract sign-in tokens from `location`.
///
/// Returns `Ok(None)` for an ordinary URL without auth parameters.
pub fn parse_redirect(location: &str) -> Result<Option<RedirectTokens>, ApiError> {
    let url = Url::parse(location).map_err(|e| ApiError::Redirect(format!("invalid redirect URL: {e}")))?;

    let mut params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if let Some(fragment) = url.fragment() {
        params.extend(url::form_urlencoded::parse(fragment.as_bytes()).into_owned());
    }
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    if let Some(description) = get("error_description").or_else(|| get("error")) {
        return Err(ApiError::Redirect(description));
    }

    let Some(access_token) = get("access_token") else {
        return Ok(None);
    };
    let refresh_token = get("refresh_token")
        .ok_or_else(|| ApiError::Redirect("sign-in link is missing a refresh token".to_string()))?;
    let expires_in = get("expires_in")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(3600);
    if expires_in < 0 || Duration::try_seconds(expires_in).is_none() {
        return Err(ApiError::Redirect(
            "sign-in link has an invalid expiry".to_string(),
        ));
    }

    Ok(Some(RedirectTokens {
        access_token,
        refresh_token,
        expires_in,
    }))
}

/// `location` without its fragment, for replacing the address bar once the
/// tokens have been consumed.
pub fn strip_fragment(location: &str) -> String {
    match location.split_once('#') {
        Some((base, _)) => base.to_string(),
        None => location.to_string(),
    }
}
