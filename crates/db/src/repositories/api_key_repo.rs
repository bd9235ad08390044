//! Repository for the `api_keys` table.

use seoflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::api_key::{ApiKey, CreateApiKey};

/// Column list for `api_keys` queries.
const COLUMNS: &str = "\
    id, user_id, name, key_hash, key_prefix, is_active, last_used_at, \
    expires_at, revoked_at, created_at, updated_at";

/// Provides lookups for API keys.
pub struct ApiKeyRepo;

impl ApiKeyRepo {
    /// Store a newly generated key. Returns the full row (with hash).
    pub async fn create(pool: &PgPool, input: &CreateApiKey) -> Result<ApiKey, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_keys (user_id, name, key_hash, key_prefix, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.key_hash)
            .bind(&input.key_prefix)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a usable key by its hash: active, not revoked, and not expired.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        key_hash: &str,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM api_keys \
             WHERE key_hash = $1 \
               AND is_active = TRUE \
               AND revoked_at IS NULL \
               AND (expires_at IS NULL OR expires_at > NOW())"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(key_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a key so it can no longer authenticate.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "UPDATE api_keys SET is_active = FALSE, revoked_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record that a key was just used.
    pub async fn touch_last_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
