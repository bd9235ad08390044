//! Route definitions for website onboarding.
//!
//! Mounted at `/websites` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes.
///
/// ```text
/// POST   /{id}/onboard   -> initialize_onboarding
/// GET    /{id}/onboard   -> poll_onboarding
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/onboard",
        get(onboarding::poll_onboarding).post(onboarding::initialize_onboarding),
    )
}
