//! Outbound seam of the orchestrator.

use async_trait::async_trait;
use seoflow_content_worker::{ContentWorkerApi, ContentWorkerError, TriggerAck};
use seoflow_core::error::CoreError;
use seoflow_core::onboarding::Trigger;
use seoflow_core::types::DbId;

/// Issues content worker triggers.
#[async_trait]
pub trait WorkerTrigger: Send + Sync {
    async fn fire(&self, website_id: DbId, trigger: Trigger)
        -> Result<TriggerAck, ContentWorkerError>;
}

#[async_trait]
impl WorkerTrigger for ContentWorkerApi {
    async fn fire(
        &self,
        website_id: DbId,
        trigger: Trigger,
    ) -> Result<TriggerAck, ContentWorkerError> {
        match trigger {
            Trigger::DiscoverTopics { count } => self.discover_topics(website_id, count).await,
            Trigger::Generate => self.generate(website_id).await,
        }
    }
}

/// How triggers are issued relative to the poll response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Await the trigger before responding. Required on request-scoped
    /// compute where nothing runs after the response is sent.
    #[default]
    Inline,
    /// Hand the trigger to a Tokio task and respond immediately.
    Spawn,
}

impl DispatchMode {
    /// Parse the `ONBOARDING_DISPATCH_MODE` value.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "spawn" => Ok(Self::Spawn),
            other => Err(CoreError::Validation(format!(
                "Invalid dispatch mode '{other}'. Must be one of: inline, spawn"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_mode_parses_case_insensitively() {
        assert_eq!(DispatchMode::parse("inline").unwrap(), DispatchMode::Inline);
        assert_eq!(DispatchMode::parse(" Spawn ").unwrap(), DispatchMode::Spawn);
        assert!(DispatchMode::parse("queue").is_err());
    }

    #[test]
    fn default_mode_is_inline() {
        assert_eq!(DispatchMode::default(), DispatchMode::Inline);
    }
}
