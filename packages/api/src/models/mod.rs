//! Data models for auth service responses.

mod user;

pub(crate) use user::{build_session, expiry_after};
pub use user::{AuthUser, TokenResponse};
