//! Repository for the `generation_logs` table.

use seoflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::generation_log::{
    CreateGenerationLog, GenerationLog, GENERATION_STATUS_SUCCESS,
};

/// Column list for `generation_logs` queries.
const COLUMNS: &str = "id, website_id, topic_id, status, article_url, error_message, created_at";

/// Provides access to article generation logs.
pub struct GenerationLogRepo;

impl GenerationLogRepo {
    /// Insert a log entry. Entries are normally written by the generation worker.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGenerationLog,
    ) -> Result<GenerationLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_logs (website_id, topic_id, status, article_url, error_message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationLog>(&query)
            .bind(input.website_id)
            .bind(input.topic_id)
            .bind(&input.status)
            .bind(&input.article_url)
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// Count successful generations for a website.
    pub async fn count_successful_by_website(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM generation_logs WHERE website_id = $1 AND status = $2",
        )
        .bind(website_id)
        .bind(GENERATION_STATUS_SUCCESS)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
