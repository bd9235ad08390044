//! Repository for the `topics` table.

use seoflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::topic::{CreateTopic, Topic};

/// Column list for `topics` queries.
const COLUMNS: &str = "id, website_id, title, keyword, created_at";

/// Provides access to discovered topics.
pub struct TopicRepo;

impl TopicRepo {
    /// Insert a topic. Topics are normally written by the discovery worker.
    pub async fn create(pool: &PgPool, input: &CreateTopic) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "INSERT INTO topics (website_id, title, keyword) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(input.website_id)
            .bind(&input.title)
            .bind(&input.keyword)
            .fetch_one(pool)
            .await
    }

    /// Count topics for a website.
    pub async fn count_by_website(pool: &PgPool, website_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics WHERE website_id = $1")
            .bind(website_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
