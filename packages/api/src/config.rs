//! Backend configuration from the environment.
//!
//! Native builds read the variables at runtime (after loading `.env` with
//! `dotenvy`). Web builds have no process environment, so the values are baked
//! in at compile time and the redirect defaults to the page's origin.

use crate::error::ApiError;

pub const URL_VAR: &str = "ZENFLOW_SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "ZENFLOW_SUPABASE_ANON_KEY";
pub const REDIRECT_VAR: &str = "ZENFLOW_REDIRECT_URL";

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_REDIRECT: &str = "http://localhost:8080";

/// Where the hosted backend lives and how to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Project URL, without trailing slash: `https://xyz.supabase.co`
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    /// Where magic links send the user back to.
    pub redirect_url: String,
}

impl BackendConfig {
    pub fn new(
        url: impl Into<String>,
        anon_key: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            redirect_url: redirect_url.into(),
        }
    }

    /// Load the configuration from environment variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let url = std::env::var(URL_VAR)
            .map_err(|_| ApiError::Config(format!("{URL_VAR} not set")))?;
        let anon_key = std::env::var(ANON_KEY_VAR)
            .map_err(|_| ApiError::Config(format!("{ANON_KEY_VAR} not set")))?;
        let redirect_url =
            std::env::var(REDIRECT_VAR).unwrap_or_else(|_| DEFAULT_REDIRECT.to_string());

        Ok(Self::new(url, anon_key, redirect_url))
    }

    /// Load the configuration baked in at build time.
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Result<Self, ApiError> {
        let url = option_env!("ZENFLOW_SUPABASE_URL")
            .ok_or_else(|| ApiError::Config(format!("{URL_VAR} not set at build time")))?;
        let anon_key = option_env!("ZENFLOW_SUPABASE_ANON_KEY")
            .ok_or_else(|| ApiError::Config(format!("{ANON_KEY_VAR} not set at build time")))?;
        let redirect_url = match option_env!("ZENFLOW_REDIRECT_URL") {
            Some(url) => url.to_string(),
            None => web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .ok_or_else(|| ApiError::Config("cannot determine page origin".to_string()))?,
        };

        Ok(Self::new(url, anon_key, redirect_url))
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = BackendConfig::new("https://xyz.supabase.co/", "anon", "http://localhost:8080");
        assert_eq!(config.endpoint("/rest/v1/tasks"), "https://xyz.supabase.co/rest/v1/tasks");
    }
}
