//! Website onboarding phases, thresholds, and the phase transition table.
//!
//! Everything here is pure: the orchestrator gathers an [`Observation`] for
//! the current phase, calls [`evaluate`], and performs the resulting [`Step`]
//! (persist, then trigger). Keeping the policy free of I/O lets every phase
//! be tested in isolation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Onboarding status
// ---------------------------------------------------------------------------

/// Phase of a website's onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    Scanning,
    Discovering,
    Generating,
    Complete,
    Failed,
}

impl OnboardingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "scanning" => Ok(Self::Scanning),
            "discovering" => Ok(Self::Discovering),
            "generating" => Ok(Self::Generating),
            "complete" => Ok(Self::Complete),
            "failed" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding status '{s}'. Must be one of: not_started, scanning, \
                 discovering, generating, complete, failed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Scanning => "scanning",
            Self::Discovering => "discovering",
            Self::Generating => "generating",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }

    /// Position along the forward path. `Failed` sits outside the path.
    fn rank(self) -> Option<u8> {
        match self {
            Self::NotStarted => Some(0),
            Self::Scanning => Some(1),
            Self::Discovering => Some(2),
            Self::Generating => Some(3),
            Self::Complete => Some(4),
            Self::Failed => None,
        }
    }

    /// Whether onboarding is actively moving through the phases.
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Scanning | Self::Discovering | Self::Generating)
    }

    /// Whether moving from `self` to `next` goes strictly forward.
    pub fn can_advance_to(self, next: Self) -> bool {
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

impl std::fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Topics required before discovery counts as complete.
pub const DEFAULT_TOPIC_TARGET: i64 = 10;
/// Topics requested from the worker per discovery trigger.
pub const DEFAULT_DISCOVERY_BATCH: u32 = 10;
/// Topics that are enough to move on once discovery has timed out.
pub const DEFAULT_FALLBACK_MIN_TOPICS: i64 = 5;
/// Seconds in `discovering` before the fallback may apply.
pub const DEFAULT_DISCOVERY_TIMEOUT_SECS: i64 = 120;
/// Seconds in `generating` before completing without an article.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: i64 = 300;
/// Minimum seconds between two discovery triggers for one website.
pub const DEFAULT_DISCOVERY_DEBOUNCE_SECS: i64 = 30;

/// Thresholds driving the phase transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingPolicy {
    pub topic_target: i64,
    pub discovery_batch: u32,
    pub fallback_min_topics: i64,
    pub discovery_timeout_secs: i64,
    pub generation_timeout_secs: i64,
    pub discovery_debounce_secs: i64,
}

impl Default for OnboardingPolicy {
    fn default() -> Self {
        Self {
            topic_target: DEFAULT_TOPIC_TARGET,
            discovery_batch: DEFAULT_DISCOVERY_BATCH,
            fallback_min_topics: DEFAULT_FALLBACK_MIN_TOPICS,
            discovery_timeout_secs: DEFAULT_DISCOVERY_TIMEOUT_SECS,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
            discovery_debounce_secs: DEFAULT_DISCOVERY_DEBOUNCE_SECS,
        }
    }
}

impl OnboardingPolicy {
    /// Reject thresholds that would make a phase impossible to leave.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.topic_target < 1 {
            return Err(CoreError::Validation(
                "topic_target must be at least 1".to_string(),
            ));
        }
        if self.discovery_batch == 0 {
            return Err(CoreError::Validation(
                "discovery_batch must be at least 1".to_string(),
            ));
        }
        if self.fallback_min_topics < 0 || self.fallback_min_topics > self.topic_target {
            return Err(CoreError::Validation(format!(
                "fallback_min_topics must be between 0 and topic_target ({})",
                self.topic_target
            )));
        }
        if self.discovery_timeout_secs < 0
            || self.generation_timeout_secs < 0
            || self.discovery_debounce_secs < 0
        {
            return Err(CoreError::Validation(
                "Onboarding timeouts must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// The discovery trigger issued on entering `discovering` or re-triggering.
    pub fn discovery_trigger(&self) -> Trigger {
        Trigger::DiscoverTopics {
            count: self.discovery_batch,
        }
    }

    /// Whether enough time has passed since the last discovery trigger.
    pub fn discovery_due(&self, last_triggered_at: Option<Timestamp>, now: Timestamp) -> bool {
        match last_triggered_at {
            None => true,
            Some(at) => elapsed_secs(at, now) > self.discovery_debounce_secs,
        }
    }
}

/// Whole seconds between `since` and `now` (negative if `since` is ahead).
pub fn elapsed_secs(since: Timestamp, now: Timestamp) -> i64 {
    (now - since).num_seconds()
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Niche and keyword information extracted from a scanned website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanData {
    pub niche_description: Option<String>,
    pub main_keywords: Vec<String>,
    pub content_themes: Vec<String>,
    pub homepage_title: Option<String>,
}

impl ScanData {
    /// Any populated field means the scan already happened.
    pub fn is_present(&self) -> bool {
        self.niche_description
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
            || !self.main_keywords.is_empty()
            || !self.content_themes.is_empty()
            || self
                .homepage_title
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Onboarding progress of one website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingRecord {
    pub website_id: DbId,
    pub status: OnboardingStatus,
    pub onboarding_started_at: Option<Timestamp>,
    pub discovery_started_at: Option<Timestamp>,
    pub generating_started_at: Option<Timestamp>,
    pub onboarding_completed_at: Option<Timestamp>,
    pub last_discovery_triggered_at: Option<Timestamp>,
    pub scan: ScanData,
    /// Topic count frozen at completion.
    pub topics_count: Option<i64>,
    /// Successful article count frozen at completion.
    pub articles_generated: Option<i64>,
}

impl OnboardingRecord {
    /// A fresh record for a website that has not started onboarding.
    pub fn new(website_id: DbId) -> Self {
        Self {
            website_id,
            status: OnboardingStatus::NotStarted,
            onboarding_started_at: None,
            discovery_started_at: None,
            generating_started_at: None,
            onboarding_completed_at: None,
            last_discovery_triggered_at: None,
            scan: ScanData::default(),
            topics_count: None,
            articles_generated: None,
        }
    }

    /// Move into `phase`, stamping the entry timestamp that phase times from.
    pub fn enter(&mut self, phase: OnboardingStatus, now: Timestamp) {
        if phase.is_in_progress() && self.onboarding_started_at.is_none() {
            self.onboarding_started_at = Some(now);
        }
        match phase {
            OnboardingStatus::Discovering => self.discovery_started_at = Some(now),
            OnboardingStatus::Generating => self.generating_started_at = Some(now),
            OnboardingStatus::Complete => self.onboarding_completed_at = Some(now),
            _ => {}
        }
        self.status = phase;
    }

    /// Reset progress so onboarding can run again, keeping scan results.
    pub fn restart(&mut self) {
        let scan = std::mem::take(&mut self.scan);
        *self = Self::new(self.website_id);
        self.scan = scan;
    }
}

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// An outbound call to the content worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    DiscoverTopics { count: u32 },
    Generate,
}

/// Why a phase was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceReason {
    /// The phase's completion check passed.
    Completed,
    /// The phase ran out of time and fell through to the next one.
    TimedOut,
}

/// What the collaborators report for the current phase.
///
/// Only the fields relevant to the phase being evaluated are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Latest completed scan, when the record itself has none.
    pub scan: Option<ScanData>,
    pub topics_count: i64,
    pub articles_generated: i64,
}

/// Outcome of evaluating one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Report the phase as it is.
    Hold,
    /// Stay in the phase but issue the trigger again.
    Retrigger(Trigger),
    /// Persist the new phase, then issue `trigger` if any.
    Advance {
        to: OnboardingStatus,
        trigger: Option<Trigger>,
        reason: AdvanceReason,
    },
}

type Check = fn(&OnboardingRecord, &Observation, &OnboardingPolicy, Timestamp) -> bool;
type Waiting =
    fn(&OnboardingRecord, &Observation, &OnboardingPolicy, Timestamp) -> Option<Trigger>;

/// Policy for one in-flight phase.
pub struct PhaseRule {
    pub phase: OnboardingStatus,
    pub next: OnboardingStatus,
    /// Trigger issued when moving to `next`.
    pub on_advance: fn(&OnboardingPolicy) -> Option<Trigger>,
    pub is_complete: Check,
    pub timed_out: Check,
    /// Action taken while neither check passes.
    pub while_waiting: Waiting,
}

static RULES: [PhaseRule; 3] = [
    PhaseRule {
        phase: OnboardingStatus::Scanning,
        next: OnboardingStatus::Discovering,
        on_advance: |policy| Some(policy.discovery_trigger()),
        is_complete: |record, obs, _, _| {
            record.scan.is_present() || obs.scan.as_ref().is_some_and(ScanData::is_present)
        },
        timed_out: |_, _, _, _| false,
        while_waiting: |_, _, _, _| None,
    },
    PhaseRule {
        phase: OnboardingStatus::Discovering,
        next: OnboardingStatus::Generating,
        on_advance: |_| Some(Trigger::Generate),
        is_complete: |_, obs, policy, _| obs.topics_count >= policy.topic_target,
        timed_out: |record, obs, policy, now| {
            record
                .discovery_started_at
                .or(record.onboarding_started_at)
                .is_some_and(|at| elapsed_secs(at, now) > policy.discovery_timeout_secs)
                && obs.topics_count >= policy.fallback_min_topics
        },
        while_waiting: |record, _, policy, now| {
            policy
                .discovery_due(record.last_discovery_triggered_at, now)
                .then(|| policy.discovery_trigger())
        },
    },
    PhaseRule {
        phase: OnboardingStatus::Generating,
        next: OnboardingStatus::Complete,
        on_advance: |_| None,
        is_complete: |_, obs, _, _| obs.articles_generated > 0,
        timed_out: |record, _, policy, now| {
            record
                .generating_started_at
                .is_some_and(|at| elapsed_secs(at, now) > policy.generation_timeout_secs)
        },
        while_waiting: |_, _, _, _| None,
    },
];

/// Look up the rule for an in-flight phase.
pub fn rule_for(phase: OnboardingStatus) -> Option<&'static PhaseRule> {
    RULES.iter().find(|rule| rule.phase == phase)
}

/// Decide what to do with a record given what the collaborators report.
///
/// Phases without a rule (`not_started`, `complete`, `failed`) always hold.
pub fn evaluate(
    record: &OnboardingRecord,
    observation: &Observation,
    policy: &OnboardingPolicy,
    now: Timestamp,
) -> Step {
    let Some(rule) = rule_for(record.status) else {
        return Step::Hold;
    };

    let reason = if (rule.is_complete)(record, observation, policy, now) {
        Some(AdvanceReason::Completed)
    } else if (rule.timed_out)(record, observation, policy, now) {
        Some(AdvanceReason::TimedOut)
    } else {
        None
    };

    match reason {
        Some(reason) => Step::Advance {
            to: rule.next,
            trigger: (rule.on_advance)(policy),
            reason,
        },
        None => match (rule.while_waiting)(record, observation, policy, now) {
            Some(trigger) => Step::Retrigger(trigger),
            None => Step::Hold,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
