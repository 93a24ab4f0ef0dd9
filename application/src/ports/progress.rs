//! Progress notification port
//!
//! Defines the interface for reporting progress during a region evaluation.

use region_gate_domain::{CheckKind, CheckOutcome, Verdict};

/// Callback for progress updates during an evaluation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait CheckProgressNotifier: Send + Sync {
    /// Called once the active checks are resolved, before any check starts
    fn on_evaluation_start(&self, checks: &[CheckKind]);

    /// Called as each check completes, in completion order
    fn on_check_complete(&self, outcome: &CheckOutcome);

    /// Called after the verdict has been combined and stored
    fn on_evaluation_complete(&self, _verdict: &Verdict) {}

    /// Called instead of `on_evaluation_complete` when the evaluation is cancelled
    fn on_evaluation_cancelled(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CheckProgressNotifier for NoProgress {
    fn on_evaluation_start(&self, _checks: &[CheckKind]) {}
    fn on_check_complete(&self, _outcome: &CheckOutcome) {}
}
