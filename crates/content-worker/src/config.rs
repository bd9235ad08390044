use std::time::Duration;

/// Default per-request timeout for trigger calls.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Connection settings for the content worker.
#[derive(Debug, Clone)]
pub struct ContentWorkerConfig {
    /// Base HTTP URL, e.g. `https://worker.internal`.
    pub base_url: String,
    /// Optional bearer token sent with every trigger.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ContentWorkerConfig {
    /// Load worker settings from environment variables.
    ///
    /// | Env Var                       | Required | Default |
    /// |-------------------------------|----------|---------|
    /// | `CONTENT_WORKER_URL`          | **yes**  | --      |
    /// | `CONTENT_WORKER_TOKEN`        | no       | --      |
    /// | `CONTENT_WORKER_TIMEOUT_SECS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `CONTENT_WORKER_URL` is missing or not an HTTP(S) URL.
    pub fn from_env() -> Self {
        let base_url = std::env::var("CONTENT_WORKER_URL")
            .expect("CONTENT_WORKER_URL must be set in the environment");
        assert!(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            "CONTENT_WORKER_URL must be an http(s) URL"
        );

        let api_token = std::env::var("CONTENT_WORKER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = std::env::var("CONTENT_WORKER_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("CONTENT_WORKER_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_token,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Settings for a worker at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
