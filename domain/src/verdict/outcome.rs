//! Outcome of a single check within an evaluation

use crate::check::CheckKind;
use crate::signal::SignalResult;
use serde::{Deserialize, Serialize};

/// What one check observed and how it resolved
///
/// # Example
///
/// ```
/// use region_gate_domain::{CheckKind, CheckOutcome, SignalResult};
///
/// let outcome = CheckOutcome::unknown(CheckKind::ByIp, "connection refused");
/// assert_eq!(outcome.result, SignalResult::Unknown);
/// assert!(!outcome.contribution());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub result: SignalResult,
    /// Code the signal reported (region, language or country), if any
    pub observed: Option<String>,
    /// Why the signal could not produce a code
    pub reason: Option<String>,
}

impl CheckOutcome {
    /// Outcome of comparing an observed code against an allow-list
    pub fn compared(kind: CheckKind, observed: impl Into<String>, allowed: bool) -> Self {
        Self {
            kind,
            result: SignalResult::from_membership(allowed),
            observed: Some(observed.into()),
            reason: None,
        }
    }

    /// A definite "not allowed" without an observed code
    pub fn missing(kind: CheckKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            result: SignalResult::NotAllowed,
            observed: None,
            reason: Some(reason.into()),
        }
    }

    /// The signal was unavailable or failed
    pub fn unknown(kind: CheckKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            result: SignalResult::Unknown,
            observed: None,
            reason: Some(reason.into()),
        }
    }

    pub fn contribution(&self) -> bool {
        self.result.contribution()
    }
}
