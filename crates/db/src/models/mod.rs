//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the create DTOs the repositories accept.

pub mod api_key;
pub mod generation_log;
pub mod onboarding;
pub mod topic;
pub mod user;
pub mod website;
pub mod website_scan;
