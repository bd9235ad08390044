//! Client for the external content-generation worker.
//!
//! The worker discovers topics and generates articles asynchronously. The
//! dashboard only fires triggers at it; results land in the `topics` and
//! `generation_logs` tables, which the onboarding orchestrator counts.

pub mod api;
pub mod config;

pub use api::{ContentWorkerApi, ContentWorkerError, TriggerAck};
pub use config::ContentWorkerConfig;
