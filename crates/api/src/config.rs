use std::fmt::Display;
use std::str::FromStr;

use seoflow_content_worker::ContentWorkerConfig;
use seoflow_core::onboarding::OnboardingPolicy;
use seoflow_onboarding::DispatchMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except the secrets and the worker URL has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Content worker connection settings.
    pub content_worker: ContentWorkerConfig,
    /// Onboarding phase thresholds.
    pub onboarding: OnboardingPolicy,
    /// Whether content worker triggers are awaited or spawned.
    pub dispatch_mode: DispatchMode,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                              | Default                    |
    /// |--------------------------------------|----------------------------|
    /// | `HOST`                               | `0.0.0.0`                  |
    /// | `PORT`                               | `3000`                     |
    /// | `CORS_ORIGINS`                       | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`               | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`              | `30`                       |
    /// | `ONBOARDING_DISPATCH_MODE`           | `inline`                   |
    /// | `ONBOARDING_TOPIC_TARGET`            | `10`                       |
    /// | `ONBOARDING_DISCOVERY_BATCH`         | `10`                       |
    /// | `ONBOARDING_FALLBACK_MIN_TOPICS`     | `5`                        |
    /// | `ONBOARDING_DISCOVERY_TIMEOUT_SECS`  | `120`                      |
    /// | `ONBOARDING_GENERATION_TIMEOUT_SECS` | `300`                      |
    /// | `ONBOARDING_DISCOVERY_DEBOUNCE_SECS` | `30`                       |
    ///
    /// JWT and content worker settings are documented on
    /// [`JwtConfig::from_env`] and [`ContentWorkerConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on any malformed value so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", 30);

        let dispatch_mode = match std::env::var("ONBOARDING_DISPATCH_MODE") {
            Ok(raw) => DispatchMode::parse(&raw)
                .unwrap_or_else(|e| panic!("ONBOARDING_DISPATCH_MODE: {e}")),
            Err(_) => DispatchMode::default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            content_worker: ContentWorkerConfig::from_env(),
            onboarding: onboarding_policy_from_env(),
            dispatch_mode,
        }
    }
}

/// Onboarding thresholds, each overridable by its own variable.
fn onboarding_policy_from_env() -> OnboardingPolicy {
    let defaults = OnboardingPolicy::default();
    let policy = OnboardingPolicy {
        topic_target: env_or("ONBOARDING_TOPIC_TARGET", defaults.topic_target),
        discovery_batch: env_or("ONBOARDING_DISCOVERY_BATCH", defaults.discovery_batch),
        fallback_min_topics: env_or(
            "ONBOARDING_FALLBACK_MIN_TOPICS",
            defaults.fallback_min_topics,
        ),
        discovery_timeout_secs: env_or(
            "ONBOARDING_DISCOVERY_TIMEOUT_SECS",
            defaults.discovery_timeout_secs,
        ),
        generation_timeout_secs: env_or(
            "ONBOARDING_GENERATION_TIMEOUT_SECS",
            defaults.generation_timeout_secs,
        ),
        discovery_debounce_secs: env_or(
            "ONBOARDING_DISCOVERY_DEBOUNCE_SECS",
            defaults.discovery_debounce_secs,
        ),
    };
    if let Err(e) = policy.validate() {
        panic!("Invalid onboarding thresholds: {e}");
    }
    policy
}

/// Parse `key` if set, otherwise fall back to `default`.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
