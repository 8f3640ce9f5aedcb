//! Tunables for the booking flow that users may override in preferences.

use std::{error::Error, fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

const DEFAULT_SELECT_SERVICE_MS: u64 = 600;
const DEFAULT_SELECT_TIME_MS: u64 = 500;
const DEFAULT_SUBMIT_DETAILS_MS: u64 = 1500;

/// Artificial latency applied before each forward transition commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionDelays {
    /// Step 1 → 2
    pub select_service_ms: u64,
    /// Step 2 → 3
    pub select_time_ms: u64,
    /// Step 3 → 4
    pub submit_details_ms: u64,
}

impl Default for TransitionDelays {
    fn default() -> Self {
        Self {
            select_service_ms: DEFAULT_SELECT_SERVICE_MS,
            select_time_ms: DEFAULT_SELECT_TIME_MS,
            submit_details_ms: DEFAULT_SUBMIT_DETAILS_MS,
        }
    }
}

impl TransitionDelays {
    /// All transitions commit on the next turn of the event loop.
    pub const fn instant() -> Self {
        Self {
            select_service_ms: 0,
            select_time_ms: 0,
            submit_details_ms: 0,
        }
    }

    pub fn select_service(&self) -> Duration {
        Duration::from_millis(self.select_service_ms)
    }

    pub fn select_time(&self) -> Duration {
        Duration::from_millis(self.select_time_ms)
    }

    pub fn submit_details(&self) -> Duration {
        Duration::from_millis(self.submit_details_ms)
    }
}

/// What happens when a trigger arrives while a transition is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentryPolicy {
    /// Reject the trigger; the pending transition completes undisturbed.
    #[default]
    Ignore,
    /// Cancel the pending transition and act on the new trigger.
    Restart,
}

impl ReentryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReentryPolicy::Ignore => "ignore",
            ReentryPolicy::Restart => "restart",
        }
    }
}

impl FromStr for ReentryPolicy {
    type Err = ParseReentryPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "restart" => Ok(Self::Restart),
            _ => Err(ParseReentryPolicyError),
        }
    }
}

impl fmt::Display for ReentryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseReentryPolicyError;

impl fmt::Display for ParseReentryPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid reentry policy; expected 'ignore' or 'restart'")
    }
}

impl Error for ParseReentryPolicyError {}

/// Flow behaviour knobs persisted alongside other preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    pub delays: TransitionDelays,
    pub reentry: ReentryPolicy,
}
