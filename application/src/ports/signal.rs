//! Signal error type shared by every signal port

use std::time::Duration;
use thiserror::Error;

/// Errors a signal source can resolve to
///
/// None of these are fatal: the evaluation maps every one of them to an
/// `Unknown` contribution for the check that hit it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Signal unavailable: {0}")]
    Unavailable(String),

    #[error("Positioning services are disabled")]
    ServicesDisabled,

    #[error("Positioning permission denied")]
    PermissionDenied,

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("A position fetch is already in flight")]
    Busy,

    #[error("Lookup failed: {0}")]
    LookupFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SignalError::Timeout(Duration::from_millis(1500)).to_string(),
            "Timed out after 1.5s"
        );
        assert_eq!(
            SignalError::LookupFailed("HTTP 503".to_string()).to_string(),
            "Lookup failed: HTTP 503"
        );
    }
}
