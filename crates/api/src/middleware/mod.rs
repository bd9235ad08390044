//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a bearer credential or session cookie.

pub mod auth;
