#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use seoflow_api::auth::jwt::{generate_access_token, JwtConfig};
use seoflow_api::config::ServerConfig;
use seoflow_api::router::build_app_router;
use seoflow_api::state::AppState;
use seoflow_content_worker::{ContentWorkerConfig, ContentWorkerError, TriggerAck};
use seoflow_core::onboarding::{OnboardingPolicy, Trigger};
use seoflow_core::types::DbId;
use seoflow_db::models::user::CreateUser;
use seoflow_db::models::website::CreateWebsite;
use seoflow_db::repositories::{UserRepo, WebsiteRepo};
use seoflow_onboarding::{DispatchMode, WorkerTrigger};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: test_jwt(),
        // Never contacted: tests swap in a recording worker.
        content_worker: ContentWorkerConfig::new("http://127.0.0.1:9"),
        onboarding: OnboardingPolicy::default(),
        dispatch_mode: DispatchMode::Inline,
    }
}

/// Content worker stand-in that records every trigger.
#[derive(Default)]
pub struct RecordingWorker {
    calls: Mutex<Vec<(DbId, Trigger)>>,
}

impl RecordingWorker {
    pub fn calls(&self) -> Vec<(DbId, Trigger)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkerTrigger for RecordingWorker {
    async fn fire(
        &self,
        website_id: DbId,
        trigger: Trigger,
    ) -> Result<TriggerAck, ContentWorkerError> {
        self.calls.lock().unwrap().push((website_id, trigger));
        Ok(TriggerAck {
            status: 202,
            job_id: None,
            body_excerpt: String::new(),
        })
    }
}

/// Build the full application router with the production middleware stack
/// and a recording content worker.
pub fn build_test_app_with_worker(pool: PgPool) -> (Router, Arc<RecordingWorker>) {
    let worker = Arc::new(RecordingWorker::default());
    let config = test_config();
    let state = AppState::new(pool, config.clone(), worker.clone());
    (build_app_router(state, &config), worker)
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_worker(pool).0
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user owning one website. Returns `(user_id, website_id)`.
pub async fn seed_owner_with_website(pool: &PgPool, email: &str) -> (DbId, DbId) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: None,
        },
    )
    .await
    .expect("user creation should succeed");
    let website = WebsiteRepo::create(
        pool,
        &CreateWebsite {
            owner_id: user.id,
            domain: format!("{}.example", user.id),
            language: None,
        },
    )
    .await
    .expect("website creation should succeed");
    (user.id, website.id)
}

pub fn access_token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_jwt()).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, headers: &[(&str, String)]) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, &[]).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, &[]).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, &[("authorization", format!("Bearer {token}"))]).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, &[("authorization", format!("Bearer {token}"))]).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, &[("cookie", cookie.to_string())]).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
