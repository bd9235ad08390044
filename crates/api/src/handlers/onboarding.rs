//! Handlers for website onboarding.
//!
//! The dashboard calls `POST` once after a website is created, then polls
//! `GET` until the status is `complete`. Every poll may advance the phase
//! and fire a content worker trigger.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use seoflow_core::types::DbId;
use seoflow_onboarding::{InitializeOutcome, PollOutcome};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /websites/{id}/onboard
// ---------------------------------------------------------------------------

/// Start onboarding for a website owned by the caller.
pub async fn initialize_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(website_id): Path<DbId>,
) -> AppResult<Json<InitializeOutcome>> {
    let outcome = state
        .onboarding
        .initialize(website_id, auth.user_id, Utc::now())
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        website_id,
        status = %outcome.status,
        "Onboarding initialized"
    );

    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// GET /websites/{id}/onboard
// ---------------------------------------------------------------------------

/// Report (and advance) onboarding progress.
pub async fn poll_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(website_id): Path<DbId>,
) -> AppResult<Json<PollOutcome>> {
    let outcome = state
        .onboarding
        .poll(website_id, auth.user_id, Utc::now())
        .await?;

    tracing::debug!(website_id, status = %outcome.status, "Onboarding polled");

    Ok(Json(outcome))
}
