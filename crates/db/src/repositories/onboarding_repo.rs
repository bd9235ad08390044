//! Repository for the `website_onboarding` table.
//!
//! Writes are conditional on the status the caller read, so two overlapping
//! polls cannot both advance the same phase or both claim the same discovery
//! slot.

use seoflow_core::onboarding::{OnboardingRecord, OnboardingStatus};
use seoflow_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::onboarding::WebsiteOnboarding;

/// Column list for `website_onboarding` queries.
const COLUMNS: &str = "\
    website_id, status, onboarding_started_at, discovery_started_at, \
    generating_started_at, onboarding_completed_at, last_discovery_triggered_at, \
    niche_description, main_keywords, content_themes, homepage_title, \
    topics_count, articles_generated, created_at, updated_at";

/// Provides access to per-website onboarding progress.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Find the onboarding row for a website.
    pub async fn find(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<Option<WebsiteOnboarding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM website_onboarding WHERE website_id = $1");
        sqlx::query_as::<_, WebsiteOnboarding>(&query)
            .bind(website_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the onboarding row for a website, inserting a `not_started`
    /// row on first access.
    pub async fn get_or_create(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<WebsiteOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO website_onboarding (website_id) VALUES ($1) \
             ON CONFLICT (website_id) DO UPDATE SET website_id = EXCLUDED.website_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebsiteOnboarding>(&query)
            .bind(website_id)
            .fetch_one(pool)
            .await
    }

    /// Write every onboarding field of `record`, but only while the stored
    /// status is still `expected`.
    ///
    /// Returns `None` when another writer moved the row first.
    pub async fn save_if_status(
        pool: &PgPool,
        record: &OnboardingRecord,
        expected: OnboardingStatus,
    ) -> Result<Option<WebsiteOnboarding>, sqlx::Error> {
        let query = format!(
            "UPDATE website_onboarding SET \
                 status = $3, \
                 onboarding_started_at = $4, \
                 discovery_started_at = $5, \
                 generating_started_at = $6, \
                 onboarding_completed_at = $7, \
                 last_discovery_triggered_at = $8, \
                 niche_description = $9, \
                 main_keywords = $10, \
                 content_themes = $11, \
                 homepage_title = $12, \
                 topics_count = $13, \
                 articles_generated = $14 \
             WHERE website_id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebsiteOnboarding>(&query)
            .bind(record.website_id)
            .bind(expected.as_str())
            .bind(record.status.as_str())
            .bind(record.onboarding_started_at)
            .bind(record.discovery_started_at)
            .bind(record.generating_started_at)
            .bind(record.onboarding_completed_at)
            .bind(record.last_discovery_triggered_at)
            .bind(&record.scan.niche_description)
            .bind(&record.scan.main_keywords)
            .bind(&record.scan.content_themes)
            .bind(&record.scan.homepage_title)
            .bind(record.topics_count)
            .bind(record.articles_generated)
            .fetch_optional(pool)
            .await
    }

    /// Claim the next discovery trigger slot for a website in `discovering`.
    ///
    /// Sets `last_discovery_triggered_at = now` only if the previous trigger
    /// is older than `cutoff` (or absent). Returns `true` if this caller won
    /// the slot and should issue the trigger.
    pub async fn claim_discovery_trigger(
        pool: &PgPool,
        website_id: DbId,
        now: Timestamp,
        cutoff: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE website_onboarding SET last_discovery_triggered_at = $2 \
             WHERE website_id = $1 \
               AND status = $4 \
               AND (last_discovery_triggered_at IS NULL OR last_discovery_triggered_at < $3)",
        )
        .bind(website_id)
        .bind(now)
        .bind(cutoff)
        .bind(OnboardingStatus::Discovering.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
