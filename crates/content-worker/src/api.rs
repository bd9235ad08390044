//! REST client for the content worker trigger endpoints.
//!
//! Both triggers are fire-and-forget: the worker queues the job and answers
//! immediately. The response body is only kept for logging.

use seoflow_core::types::DbId;
use serde::Deserialize;

use crate::config::ContentWorkerConfig;

/// Longest response body excerpt kept for logging.
const MAX_BODY_EXCERPT: usize = 512;

/// HTTP client for the content worker.
#[derive(Debug, Clone)]
pub struct ContentWorkerApi {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

/// What the worker answered to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAck {
    /// HTTP status code.
    pub status: u16,
    /// Job identifier, when the worker reports one.
    pub job_id: Option<String>,
    /// Start of the raw body, for logs.
    pub body_excerpt: String,
}

#[derive(Debug, Deserialize)]
struct AckBody {
    job_id: Option<String>,
}

/// Errors from the content worker client.
#[derive(Debug, thiserror::Error)]
pub enum ContentWorkerError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The worker returned a non-2xx status code.
    #[error("Content worker error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ContentWorkerApi {
    /// Build a client from worker settings.
    pub fn new(config: &ContentWorkerConfig) -> Result<Self, ContentWorkerError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.api_token.clone(),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the worker to propose `count` new topics for a website.
    ///
    /// Sends `POST /discover-topics?website_id={id}&count={count}`.
    pub async fn discover_topics(
        &self,
        website_id: DbId,
        count: u32,
    ) -> Result<TriggerAck, ContentWorkerError> {
        let request = self
            .client
            .post(format!("{}/discover-topics", self.base_url))
            .query(&[("website_id", website_id.to_string()), ("count", count.to_string())]);
        self.send(request).await
    }

    /// Ask the worker to generate and publish an article for a website.
    ///
    /// Sends `POST /generate?website_id={id}`.
    pub async fn generate(&self, website_id: DbId) -> Result<TriggerAck, ContentWorkerError> {
        let request = self
            .client
            .post(format!("{}/generate", self.base_url))
            .query(&[("website_id", website_id.to_string())]);
        self.send(request).await
    }

    // ---- private helpers ----

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<TriggerAck, ContentWorkerError> {
        let request = match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Content worker rejected trigger");
            return Err(ContentWorkerError::ApiError {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let job_id = serde_json::from_str::<AckBody>(&body)
            .ok()
            .and_then(|ack| ack.job_id);
        tracing::debug!(status = status.as_u16(), job_id = ?job_id, "Content worker responded");

        Ok(TriggerAck {
            status: status.as_u16(),
            job_id,
            body_excerpt: excerpt(&body),
        })
    }
}

/// Truncate a body to [`MAX_BODY_EXCERPT`] bytes on a char boundary.
fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = ContentWorkerApi::with_client(
            reqwest::Client::new(),
            "http://worker.local/".to_string(),
            None,
        );
        assert_eq!(api.base_url(), "http://worker.local");
    }

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(excerpt("{\"ok\":true}"), "{\"ok\":true}");
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(400);
        let cut = excerpt(&body);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= MAX_BODY_EXCERPT + 3);
    }

    #[test]
    fn api_error_display() {
        let err = ContentWorkerError::ApiError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Content worker error (502): bad gateway");
    }
}
