//! Output formatter trait

use region_gate_domain::{OutputFormat, Verdict};

/// Trait for formatting a region verdict
pub trait OutputFormatter {
    /// Format in the human-readable console style
    fn format_human(&self, verdict: &Verdict) -> String;

    /// Format as JSON
    fn format_json(&self, verdict: &Verdict) -> String;

    /// Format for scripts: the decision, then one line per check
    fn format_plain(&self, verdict: &Verdict) -> String;

    /// Format in the requested style
    fn format(&self, verdict: &Verdict, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.format_human(verdict),
            OutputFormat::Json => self.format_json(verdict),
            OutputFormat::Plain => self.format_plain(verdict),
        }
    }
}
