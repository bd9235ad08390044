//! Article generation attempts recorded by the generation worker.

use seoflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status of a generation attempt that produced a published article.
pub const GENERATION_STATUS_SUCCESS: &str = "success";

/// A row from the `generation_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationLog {
    pub id: DbId,
    pub website_id: DbId,
    pub topic_id: Option<DbId>,
    pub status: String,
    pub article_url: Option<String>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a generation attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenerationLog {
    pub website_id: DbId,
    pub topic_id: Option<DbId>,
    pub status: String,
    pub article_url: Option<String>,
    pub error_message: Option<String>,
}
