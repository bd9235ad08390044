pub mod health;
pub mod onboarding;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /websites/{id}/onboard                           initialize (POST), poll (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/websites", onboarding::router())
}
