//! Website scan results produced by the external scanner.

use seoflow_core::onboarding::ScanData;
use seoflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Scan status written by the scanner once results are final.
pub const SCAN_STATUS_COMPLETED: &str = "completed";

/// A row from the `website_scans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebsiteScan {
    pub id: DbId,
    pub website_id: DbId,
    pub status: String,
    pub niche_description: Option<String>,
    pub main_keywords: Vec<String>,
    pub content_themes: Vec<String>,
    pub homepage_title: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl WebsiteScan {
    /// The niche and keyword payload of this scan.
    pub fn scan_data(&self) -> ScanData {
        ScanData {
            niche_description: self.niche_description.clone(),
            main_keywords: self.main_keywords.clone(),
            content_themes: self.content_themes.clone(),
            homepage_title: self.homepage_title.clone(),
        }
    }
}

/// DTO for recording a scan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebsiteScan {
    pub website_id: DbId,
    pub status: String,
    pub niche_description: Option<String>,
    #[serde(default)]
    pub main_keywords: Vec<String>,
    #[serde(default)]
    pub content_themes: Vec<String>,
    pub homepage_title: Option<String>,
}
