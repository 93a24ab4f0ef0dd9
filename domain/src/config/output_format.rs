//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for evaluation results
///
/// This is a domain concept representing how a verdict should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Verdict with a per-check breakdown (default)
    #[default]
    Human,
    /// JSON output
    Json,
    /// "allowed" or "blocked", then one tab-separated line per check
    Plain,
}
