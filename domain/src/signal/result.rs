//! Per-check signal result

use serde::{Deserialize, Serialize};

/// Tri-state outcome of a single check
///
/// `Unknown` means the signal was unavailable or failed. It is never
/// dropped from the combination; it contributes `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalResult {
    Allowed,
    NotAllowed,
    Unknown,
}

impl SignalResult {
    /// Map an allow-list membership test to a result
    pub fn from_membership(allowed: bool) -> Self {
        if allowed {
            SignalResult::Allowed
        } else {
            SignalResult::NotAllowed
        }
    }

    /// This result's contribution to the combined verdict
    pub fn contribution(&self) -> bool {
        matches!(self, SignalResult::Allowed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalResult::Allowed => "allowed",
            SignalResult::NotAllowed => "not allowed",
            SignalResult::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SignalResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
