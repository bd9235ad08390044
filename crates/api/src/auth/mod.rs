//! Caller identity primitives.
//!
//! - [`jwt`] -- access-token generation and validation.

pub mod jwt;

/// Cookie carrying an access token for browser sessions.
pub const SESSION_COOKIE: &str = "session";
