use seoflow_core::error::CoreError;
use seoflow_core::types::DbId;

/// Errors surfaced by the onboarding orchestrator.
///
/// Content worker failures never appear here; they are logged and absorbed.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// The website does not exist or is not owned by the caller.
    #[error("Website {0} not found")]
    WebsiteNotFound(DbId),

    /// A domain-level error (e.g. an unparseable stored status).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
