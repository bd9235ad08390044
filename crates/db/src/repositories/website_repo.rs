//! Repository for the `websites` table.

use seoflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::website::{CreateWebsite, Website};

/// Column list for `websites` queries.
const COLUMNS: &str = "id, owner_id, domain, language, created_at, updated_at";

/// Provides lookups for websites.
pub struct WebsiteRepo;

impl WebsiteRepo {
    /// Insert a new website, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWebsite) -> Result<Website, sqlx::Error> {
        let query = format!(
            "INSERT INTO websites (owner_id, domain, language) \
             VALUES ($1, $2, COALESCE($3, 'en')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Website>(&query)
            .bind(input.owner_id)
            .bind(&input.domain)
            .bind(&input.language)
            .fetch_one(pool)
            .await
    }

    /// Find a website by ID, but only if `owner_id` owns it.
    ///
    /// A website owned by someone else is indistinguishable from a missing one.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM websites WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Website>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a website. Its onboarding row, topics, and logs cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
