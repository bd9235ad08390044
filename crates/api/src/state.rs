use std::sync::Arc;

use seoflow_onboarding::{OnboardingOrchestrator, PgOnboardingStore, WorkerTrigger};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: seoflow_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Onboarding driver behind `/websites/{id}/onboard`.
    pub onboarding: OnboardingOrchestrator,
}

impl AppState {
    /// Wire the Postgres-backed orchestrator around `worker`.
    pub fn new(
        pool: seoflow_db::DbPool,
        config: ServerConfig,
        worker: Arc<dyn WorkerTrigger>,
    ) -> Self {
        let store = Arc::new(PgOnboardingStore::new(pool.clone()));
        let onboarding = OnboardingOrchestrator::new(
            store,
            worker,
            config.onboarding.clone(),
            config.dispatch_mode,
        );
        Self {
            pool,
            config: Arc::new(config),
            onboarding,
        }
    }
}
