//! Domain types shared by every seoflow crate.
//!
//! This crate has no internal dependencies so the repository layer, the
//! onboarding orchestrator, and the HTTP server can all build on it.

pub mod api_keys;
pub mod error;
pub mod hashing;
pub mod onboarding;
pub mod types;
