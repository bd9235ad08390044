//! Website onboarding orchestration.
//!
//! A poll-driven state machine that moves a website through
//! scan -> discover -> generate. Every poll re-evaluates the current phase
//! against the collaborator stores, persists any transition, and then fires
//! the next content worker trigger.
//!
//! - [`store::OnboardingStore`] -- persistence and read-only collaborator counts.
//! - [`trigger::WorkerTrigger`] -- outbound calls to the content worker.
//! - [`orchestrator::OnboardingOrchestrator`] -- the driver behind both endpoints.

pub mod error;
pub mod orchestrator;
pub mod pg_store;
pub mod store;
pub mod trigger;

pub use error::OnboardingError;
pub use orchestrator::{InitializeOutcome, OnboardingOrchestrator, PollOutcome};
pub use pg_store::PgOnboardingStore;
pub use store::OnboardingStore;
pub use trigger::{DispatchMode, WorkerTrigger};
