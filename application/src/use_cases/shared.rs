//! Shared utilities for use cases.

use crate::use_cases::evaluate_region::EvaluateRegionError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(EvaluateRegionError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(
    token: &Option<CancellationToken>,
) -> Result<(), EvaluateRegionError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(EvaluateRegionError::Cancelled);
    }
    Ok(())
}
