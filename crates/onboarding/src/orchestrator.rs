//! The onboarding driver behind `POST` and `GET /websites/{id}/onboard`.
//!
//! Each call reads the record, gathers an [`Observation`] for the current
//! phase, asks [`evaluate`] what to do, persists any transition with a
//! conditional write, and only then dispatches the content worker trigger.
//! A call that loses a race against a concurrent poll reports the winner's
//! state and fires nothing.

use std::sync::Arc;

use chrono::Duration;
use seoflow_core::onboarding::{
    evaluate, AdvanceReason, Observation, OnboardingPolicy, OnboardingRecord, OnboardingStatus,
    Step, Trigger,
};
use seoflow_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::error::OnboardingError;
use crate::store::OnboardingStore;
use crate::trigger::{DispatchMode, WorkerTrigger};

/// Response of an initialize call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitializeOutcome {
    pub website_id: DbId,
    pub status: OnboardingStatus,
    pub message: String,
}

/// Response of a poll. Fields are present only where the phase has them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollOutcome {
    pub website_id: DbId,
    pub status: OnboardingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles_generated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Counts actually read from the collaborator stores during one poll.
#[derive(Debug, Default, Clone, Copy)]
struct Counted {
    topics: Option<i64>,
    articles: Option<i64>,
}

/// Drives websites through scan -> discover -> generate.
#[derive(Clone)]
pub struct OnboardingOrchestrator {
    store: Arc<dyn OnboardingStore>,
    worker: Arc<dyn WorkerTrigger>,
    policy: OnboardingPolicy,
    dispatch: DispatchMode,
}

impl OnboardingOrchestrator {
    pub fn new(
        store: Arc<dyn OnboardingStore>,
        worker: Arc<dyn WorkerTrigger>,
        policy: OnboardingPolicy,
        dispatch: DispatchMode,
    ) -> Self {
        Self {
            store,
            worker,
            policy,
            dispatch,
        }
    }

    pub fn policy(&self) -> &OnboardingPolicy {
        &self.policy
    }

    // -----------------------------------------------------------------------
    // Initialize
    // -----------------------------------------------------------------------

    /// Start onboarding for a website.
    ///
    /// Complete and in-progress records are returned untouched. A `failed`
    /// record is restarted with its scan data kept. When scan data is
    /// already available the scan phase is skipped and discovery is
    /// triggered immediately.
    pub async fn initialize(
        &self,
        website_id: DbId,
        owner_id: DbId,
        now: Timestamp,
    ) -> Result<InitializeOutcome, OnboardingError> {
        self.ensure_owned(website_id, owner_id).await?;
        let mut record = self.store.load_or_create(website_id).await?;
        let expected = record.status;

        match expected {
            OnboardingStatus::Complete => {
                return Ok(initialized(&record, "Onboarding already complete"));
            }
            status if status.is_in_progress() => {
                return Ok(initialized(&record, "Onboarding already in progress"));
            }
            OnboardingStatus::Failed => record.restart(),
            _ => {}
        }

        if !record.scan.is_present() {
            if let Some(scan) = self.store.latest_scan(website_id).await? {
                if scan.is_present() {
                    record.scan = scan;
                }
            }
        }

        let (phase, trigger, message) = if record.scan.is_present() {
            record.last_discovery_triggered_at = Some(now);
            (
                OnboardingStatus::Discovering,
                Some(self.policy.discovery_trigger()),
                "Scan data found, discovering content topics",
            )
        } else {
            (OnboardingStatus::Scanning, None, "Website scan started")
        };
        record.enter(phase, now);

        let Some(saved) = self.store.save_if_status(&record, expected).await? else {
            tracing::debug!(website_id, "Onboarding initialize lost a concurrent update");
            let current = self.store.load_or_create(website_id).await?;
            return Ok(initialized(&current, "Onboarding already in progress"));
        };

        tracing::info!(
            website_id,
            from = %expected,
            to = %saved.status,
            "Onboarding started"
        );
        if let Some(trigger) = trigger {
            self.dispatch(website_id, trigger).await;
        }
        Ok(initialized(&saved, message))
    }

    // -----------------------------------------------------------------------
    // Poll
    // -----------------------------------------------------------------------

    /// Report onboarding progress, advancing the phase when its check passes.
    ///
    /// Issues at most one content worker trigger.
    pub async fn poll(
        &self,
        website_id: DbId,
        owner_id: DbId,
        now: Timestamp,
    ) -> Result<PollOutcome, OnboardingError> {
        self.ensure_owned(website_id, owner_id).await?;
        let mut record = self.store.load_or_create(website_id).await?;
        let (observation, counted) = self.observe(&record).await?;

        match evaluate(&record, &observation, &self.policy, now) {
            Step::Hold => Ok(polled(&record, counted, None)),

            Step::Retrigger(trigger) => {
                let cutoff = now - Duration::seconds(self.policy.discovery_debounce_secs);
                if self
                    .store
                    .claim_discovery_trigger(website_id, now, cutoff)
                    .await?
                {
                    record.last_discovery_triggered_at = Some(now);
                    tracing::info!(website_id, ?trigger, "Re-triggering topic discovery");
                    self.dispatch(website_id, trigger).await;
                }
                Ok(polled(&record, counted, None))
            }

            Step::Advance {
                to,
                trigger,
                reason,
            } => {
                let from = record.status;
                debug_assert!(from.can_advance_to(to));

                let mut next = record.clone();
                if !next.scan.is_present() {
                    if let Some(scan) = observation.scan.clone() {
                        next.scan = scan;
                    }
                }
                next.enter(to, now);
                if matches!(trigger, Some(Trigger::DiscoverTopics { .. })) {
                    next.last_discovery_triggered_at = Some(now);
                }
                if to == OnboardingStatus::Complete {
                    next.topics_count = Some(observation.topics_count);
                    next.articles_generated = Some(observation.articles_generated);
                }

                let Some(saved) = self.store.save_if_status(&next, from).await? else {
                    tracing::debug!(website_id, %from, %to, "Onboarding poll lost a concurrent update");
                    let current = self.store.load_or_create(website_id).await?;
                    return Ok(polled(&current, Counted::default(), None));
                };

                match reason {
                    AdvanceReason::Completed => {
                        tracing::info!(website_id, %from, %to, "Onboarding phase completed");
                    }
                    AdvanceReason::TimedOut => {
                        tracing::warn!(website_id, %from, %to, "Onboarding phase timed out, moving on");
                    }
                }
                if let Some(trigger) = trigger {
                    self.dispatch(website_id, trigger).await;
                }

                let note = (to == OnboardingStatus::Complete
                    && reason == AdvanceReason::TimedOut)
                    .then_some("Onboarding complete, the first article is still being generated");
                Ok(polled(&saved, counted, note))
            }
        }
    }

    // ---- private helpers ----

    async fn ensure_owned(&self, website_id: DbId, owner_id: DbId) -> Result<(), OnboardingError> {
        if self.store.website_owned_by(website_id, owner_id).await? {
            Ok(())
        } else {
            Err(OnboardingError::WebsiteNotFound(website_id))
        }
    }

    /// Read only what the current phase is evaluated against.
    async fn observe(
        &self,
        record: &OnboardingRecord,
    ) -> Result<(Observation, Counted), OnboardingError> {
        let website_id = record.website_id;
        let mut observation = Observation::default();
        let mut counted = Counted::default();

        match record.status {
            OnboardingStatus::Scanning => {
                if !record.scan.is_present() {
                    observation.scan = self.store.latest_scan(website_id).await?;
                }
            }
            OnboardingStatus::Discovering => {
                observation.topics_count = self.store.count_topics(website_id).await?;
                counted.topics = Some(observation.topics_count);
            }
            OnboardingStatus::Generating => {
                observation.topics_count = self.store.count_topics(website_id).await?;
                observation.articles_generated =
                    self.store.count_successful_articles(website_id).await?;
                counted.topics = Some(observation.topics_count);
                counted.articles = Some(observation.articles_generated);
            }
            OnboardingStatus::NotStarted | OnboardingStatus::Complete | OnboardingStatus::Failed => {}
        }
        Ok((observation, counted))
    }

    async fn dispatch(&self, website_id: DbId, trigger: Trigger) {
        match self.dispatch {
            DispatchMode::Inline => fire(self.worker.as_ref(), website_id, trigger).await,
            DispatchMode::Spawn => {
                let worker = Arc::clone(&self.worker);
                tokio::spawn(async move {
                    fire(worker.as_ref(), website_id, trigger).await;
                });
            }
        }
    }
}

/// Issue one trigger. Failures are logged and never reach the caller.
async fn fire(worker: &dyn WorkerTrigger, website_id: DbId, trigger: Trigger) {
    match worker.fire(website_id, trigger).await {
        Ok(ack) => tracing::info!(
            website_id,
            ?trigger,
            status = ack.status,
            job_id = ?ack.job_id,
            "Content worker accepted trigger",
        ),
        Err(e) => tracing::warn!(
            website_id,
            ?trigger,
            error = %e,
            "Content worker trigger failed",
        ),
    }
}

fn initialized(record: &OnboardingRecord, message: &str) -> InitializeOutcome {
    InitializeOutcome {
        website_id: record.website_id,
        status: record.status,
        message: message.to_string(),
    }
}

fn polled(record: &OnboardingRecord, counted: Counted, note: Option<&str>) -> PollOutcome {
    let mut outcome = PollOutcome {
        website_id: record.website_id,
        status: record.status,
        scan_complete: None,
        topics_count: None,
        articles_generated: None,
        message: None,
    };
    let default_message = match record.status {
        OnboardingStatus::NotStarted => "Onboarding has not started",
        OnboardingStatus::Scanning => {
            outcome.scan_complete = Some(false);
            "Scanning website"
        }
        OnboardingStatus::Discovering => {
            outcome.scan_complete = Some(true);
            outcome.topics_count = counted.topics;
            "Discovering content topics"
        }
        OnboardingStatus::Generating => {
            outcome.scan_complete = Some(true);
            outcome.topics_count = counted.topics;
            outcome.articles_generated = counted.articles;
            "Generating the first article"
        }
        OnboardingStatus::Complete => {
            outcome.scan_complete = Some(true);
            outcome.topics_count = record.topics_count;
            outcome.articles_generated = record.articles_generated;
            "Onboarding complete"
        }
        OnboardingStatus::Failed => "Onboarding failed, start it again to retry",
    };
    outcome.message = Some(note.unwrap_or(default_message).to_string());
    outcome
}
