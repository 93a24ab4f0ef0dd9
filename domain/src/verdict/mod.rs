//! Verdict: the combined outcome of an evaluation
//!
//! The verdict is the logical AND over the outcomes of exactly the checks
//! that ran. A check that was not selected does not participate; a
//! selected check with an `Unknown` result contributes `false`.

pub mod outcome;

pub use outcome::CheckOutcome;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one region evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the device is allowed
    pub allowed: bool,
    /// Per-check outcomes in canonical check order
    pub outcomes: Vec<CheckOutcome>,
    /// True when an empty check set was replaced by all checks
    pub defaulted: bool,
    /// True when the policy forced a block over the check outcomes
    #[serde(default)]
    pub forced: bool,
    pub evaluated_at: DateTime<Utc>,
}

impl Verdict {
    /// Combine check outcomes into a verdict
    ///
    /// An empty outcome list is vacuously allowed; callers resolve the
    /// check set through `RegionPolicy::active_checks`, which is never empty.
    pub fn from_outcomes(mut outcomes: Vec<CheckOutcome>, defaulted: bool) -> Self {
        outcomes.sort_by_key(|o| o.kind);
        let allowed = outcomes.iter().all(CheckOutcome::contribution);

        Self {
            allowed,
            outcomes,
            defaulted,
            forced: false,
            evaluated_at: Utc::now(),
        }
    }

    /// Mark the verdict blocked regardless of its outcomes
    pub fn force_block(mut self) -> Self {
        self.allowed = false;
        self.forced = true;
        self
    }

    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }

    /// Outcomes that pulled the verdict to "not allowed"
    ///
    /// Empty for a forced block over passing checks.
    pub fn blocking_outcomes(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.contribution())
    }

    /// One glyph per check: ● allowed, ○ not allowed, ? unknown
    pub fn summary(&self) -> String {
        let mut summary = String::from("[");
        for outcome in &self.outcomes {
            summary.push(match outcome.result {
                crate::SignalResult::Allowed => '●',
                crate::SignalResult::NotAllowed => '○',
                crate::SignalResult::Unknown => '?',
            });
        }
        summary.push(']');
        summary
    }
}
