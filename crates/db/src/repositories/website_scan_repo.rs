//! Repository for the `website_scans` table.

use seoflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::website_scan::{CreateWebsiteScan, WebsiteScan, SCAN_STATUS_COMPLETED};

/// Column list for `website_scans` queries.
const COLUMNS: &str = "id, website_id, status, niche_description, main_keywords, \
     content_themes, homepage_title, completed_at, created_at";

/// Provides access to website scan results.
pub struct WebsiteScanRepo;

impl WebsiteScanRepo {
    /// Record a scan. `completed_at` is stamped when the status is `completed`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWebsiteScan,
    ) -> Result<WebsiteScan, sqlx::Error> {
        let query = format!(
            "INSERT INTO website_scans \
                 (website_id, status, niche_description, main_keywords, content_themes, \
                  homepage_title, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $2 = '{SCAN_STATUS_COMPLETED}' THEN NOW() END) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebsiteScan>(&query)
            .bind(input.website_id)
            .bind(&input.status)
            .bind(&input.niche_description)
            .bind(&input.main_keywords)
            .bind(&input.content_themes)
            .bind(&input.homepage_title)
            .fetch_one(pool)
            .await
    }

    /// Most recent completed scan for a website.
    pub async fn find_latest_completed(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<Option<WebsiteScan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM website_scans \
             WHERE website_id = $1 AND status = $2 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, WebsiteScan>(&query)
            .bind(website_id)
            .bind(SCAN_STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }
}
