//! Persistence seam of the orchestrator.

use async_trait::async_trait;
use seoflow_core::onboarding::{OnboardingRecord, OnboardingStatus, ScanData};
use seoflow_core::types::{DbId, Timestamp};

use crate::error::OnboardingError;

/// Onboarding records plus the read-only stores the phases are checked against.
#[async_trait]
pub trait OnboardingStore: Send + Sync {
    /// Whether `website_id` exists and belongs to `owner_id`.
    async fn website_owned_by(&self, website_id: DbId, owner_id: DbId)
        -> Result<bool, OnboardingError>;

    /// The website's onboarding record, created as `not_started` if missing.
    async fn load_or_create(&self, website_id: DbId) -> Result<OnboardingRecord, OnboardingError>;

    /// Persist `record` only if the stored status is still `expected`.
    ///
    /// Returns `None` when a concurrent writer changed the status first.
    async fn save_if_status(
        &self,
        record: &OnboardingRecord,
        expected: OnboardingStatus,
    ) -> Result<Option<OnboardingRecord>, OnboardingError>;

    /// Atomically set `last_discovery_triggered_at = now` if the previous
    /// trigger is older than `cutoff`. Returns whether the slot was won.
    async fn claim_discovery_trigger(
        &self,
        website_id: DbId,
        now: Timestamp,
        cutoff: Timestamp,
    ) -> Result<bool, OnboardingError>;

    /// Payload of the most recent completed scan, if any.
    async fn latest_scan(&self, website_id: DbId) -> Result<Option<ScanData>, OnboardingError>;

    async fn count_topics(&self, website_id: DbId) -> Result<i64, OnboardingError>;

    async fn count_successful_articles(&self, website_id: DbId) -> Result<i64, OnboardingError>;
}
