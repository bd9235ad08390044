//! Website onboarding row model.

use seoflow_core::error::CoreError;
use seoflow_core::onboarding::{OnboardingRecord, OnboardingStatus, ScanData};
use seoflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `website_onboarding` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebsiteOnboarding {
    pub website_id: DbId,
    pub status: String,
    pub onboarding_started_at: Option<Timestamp>,
    pub discovery_started_at: Option<Timestamp>,
    pub generating_started_at: Option<Timestamp>,
    pub onboarding_completed_at: Option<Timestamp>,
    pub last_discovery_triggered_at: Option<Timestamp>,
    pub niche_description: Option<String>,
    pub main_keywords: Vec<String>,
    pub content_themes: Vec<String>,
    pub homepage_title: Option<String>,
    pub topics_count: Option<i64>,
    pub articles_generated: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WebsiteOnboarding {
    /// Convert the row into the typed domain record.
    pub fn into_record(self) -> Result<OnboardingRecord, CoreError> {
        Ok(OnboardingRecord {
            website_id: self.website_id,
            status: OnboardingStatus::from_str_db(&self.status)?,
            onboarding_started_at: self.onboarding_started_at,
            discovery_started_at: self.discovery_started_at,
            generating_started_at: self.generating_started_at,
            onboarding_completed_at: self.onboarding_completed_at,
            last_discovery_triggered_at: self.last_discovery_triggered_at,
            scan: ScanData {
                niche_description: self.niche_description,
                main_keywords: self.main_keywords,
                content_themes: self.content_themes,
                homepage_title: self.homepage_title,
            },
            topics_count: self.topics_count,
            articles_generated: self.articles_generated,
        })
    }
}
