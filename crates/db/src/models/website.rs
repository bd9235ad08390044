//! Website entity model and DTOs.

use seoflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `websites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Website {
    pub id: DbId,
    pub owner_id: DbId,
    pub domain: String,
    pub language: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new website.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebsite {
    pub owner_id: DbId,
    pub domain: String,
    /// Defaults to `en` when omitted.
    pub language: Option<String>,
}
