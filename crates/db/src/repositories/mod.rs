//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod api_key_repo;
pub mod generation_log_repo;
pub mod onboarding_repo;
pub mod topic_repo;
pub mod user_repo;
pub mod website_repo;
pub mod website_scan_repo;

pub use api_key_repo::ApiKeyRepo;
pub use generation_log_repo::GenerationLogRepo;
pub use onboarding_repo::OnboardingRepo;
pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
pub use website_repo::WebsiteRepo;
pub use website_scan_repo::WebsiteScanRepo;
