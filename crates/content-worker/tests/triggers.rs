//! Trigger calls against a local stand-in for the content worker.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use seoflow_content_worker::{ContentWorkerApi, ContentWorkerConfig, ContentWorkerError};

/// One request seen by the fake worker.
#[derive(Debug, Clone)]
struct Seen {
    path: &'static str,
    query: HashMap<String, String>,
    authorization: Option<String>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

async fn discover(
    State(log): State<Log>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    log.lock().unwrap().push(Seen {
        path: "/discover-topics",
        query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    Json(serde_json::json!({ "job_id": "disc-1", "queued": true }))
}

async fn generate(
    State(log): State<Log>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    log.lock().unwrap().push(Seen {
        path: "/generate",
        query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    (StatusCode::ACCEPTED, "queued".to_string())
}

/// Start the fake worker on an ephemeral port and return its base URL.
async fn spawn_worker(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn recording_worker() -> (String, Log) {
    let log: Log = Arc::default();
    let app = Router::new()
        .route("/discover-topics", post(discover))
        .route("/generate", post(generate))
        .with_state(Arc::clone(&log));
    (spawn_worker(app).await, log)
}

#[tokio::test]
async fn discover_topics_sends_website_and_count() {
    let (url, log) = recording_worker().await;
    let mut config = ContentWorkerConfig::new(url);
    config.api_token = Some("worker-secret".to_string());
    let api = ContentWorkerApi::new(&config).unwrap();

    let ack = api.discover_topics(42, 10).await.unwrap();
    assert_eq!(ack.status, 200);
    assert_eq!(ack.job_id.as_deref(), Some("disc-1"));

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/discover-topics");
    assert_eq!(seen[0].query.get("website_id").map(String::as_str), Some("42"));
    assert_eq!(seen[0].query.get("count").map(String::as_str), Some("10"));
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer worker-secret"));
}

#[tokio::test]
async fn generate_accepts_non_json_bodies() {
    let (url, log) = recording_worker().await;
    let api = ContentWorkerApi::new(&ContentWorkerConfig::new(format!("{url}/"))).unwrap();

    let ack = api.generate(7).await.unwrap();
    assert_eq!(ack.status, 202);
    assert_eq!(ack.job_id, None);
    assert_eq!(ack.body_excerpt, "queued");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen[0].path, "/generate");
    assert_eq!(seen[0].query.get("website_id").map(String::as_str), Some("7"));
    assert!(!seen[0].query.contains_key("count"));
    assert!(seen[0].authorization.is_none());
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let app = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "worker busy") }),
    );
    let url = spawn_worker(app).await;
    let api = ContentWorkerApi::new(&ContentWorkerConfig::new(url)).unwrap();

    match api.generate(1).await {
        Err(ContentWorkerError::ApiError { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "worker busy");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_worker_is_a_request_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ContentWorkerApi::new(&ContentWorkerConfig::new(format!("http://{addr}"))).unwrap();
    let result = api.discover_topics(1, 10).await;
    assert!(matches!(result, Err(ContentWorkerError::Request(_))));
}
