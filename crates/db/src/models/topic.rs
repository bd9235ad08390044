//! Content topics proposed by the discovery worker.

use seoflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub website_id: DbId,
    pub title: String,
    pub keyword: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a topic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopic {
    pub website_id: DbId,
    pub title: String,
    pub keyword: Option<String>,
}
