//! [`OnboardingStore`] backed by the Postgres repositories.

use async_trait::async_trait;
use seoflow_core::onboarding::{OnboardingRecord, OnboardingStatus, ScanData};
use seoflow_core::types::{DbId, Timestamp};
use seoflow_db::repositories::{
    GenerationLogRepo, OnboardingRepo, TopicRepo, WebsiteRepo, WebsiteScanRepo,
};
use seoflow_db::DbPool;

use crate::error::OnboardingError;
use crate::store::OnboardingStore;

/// Postgres-backed onboarding store.
#[derive(Clone)]
pub struct PgOnboardingStore {
    pool: DbPool,
}

impl PgOnboardingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OnboardingStore for PgOnboardingStore {
    async fn website_owned_by(
        &self,
        website_id: DbId,
        owner_id: DbId,
    ) -> Result<bool, OnboardingError> {
        let website = WebsiteRepo::find_by_id_and_owner(&self.pool, website_id, owner_id).await?;
        Ok(website.is_some())
    }

    async fn load_or_create(&self, website_id: DbId) -> Result<OnboardingRecord, OnboardingError> {
        let row = OnboardingRepo::get_or_create(&self.pool, website_id).await?;
        Ok(row.into_record()?)
    }

    async fn save_if_status(
        &self,
        record: &OnboardingRecord,
        expected: OnboardingStatus,
    ) -> Result<Option<OnboardingRecord>, OnboardingError> {
        let row = OnboardingRepo::save_if_status(&self.pool, record, expected).await?;
        Ok(row.map(|r| r.into_record()).transpose()?)
    }

    async fn claim_discovery_trigger(
        &self,
        website_id: DbId,
        now: Timestamp,
        cutoff: Timestamp,
    ) -> Result<bool, OnboardingError> {
        Ok(OnboardingRepo::claim_discovery_trigger(&self.pool, website_id, now, cutoff).await?)
    }

    async fn latest_scan(&self, website_id: DbId) -> Result<Option<ScanData>, OnboardingError> {
        let scan = WebsiteScanRepo::find_latest_completed(&self.pool, website_id).await?;
        Ok(scan.map(|s| s.scan_data()))
    }

    async fn count_topics(&self, website_id: DbId) -> Result<i64, OnboardingError> {
        Ok(TopicRepo::count_by_website(&self.pool, website_id).await?)
    }

    async fn count_successful_articles(&self, website_id: DbId) -> Result<i64, OnboardingError> {
        Ok(GenerationLogRepo::count_successful_by_website(&self.pool, website_id).await?)
    }
}
