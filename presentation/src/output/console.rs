//! Console output formatter for region verdicts

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use region_gate_domain::{CheckOutcome, SignalResult, Verdict};

/// Formats verdicts for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn outcome_line(outcome: &CheckOutcome) -> String {
        let observed = outcome.observed.as_deref().unwrap_or("-");
        let mut line = format!(
            "  {} {:<9} {:<6} {}",
            result_glyph(outcome.result),
            outcome.kind.as_str(),
            observed,
            result_label(outcome.result)
        );
        if let Some(reason) = &outcome.reason {
            line.push_str(&format!(" {}", format!("({})", reason).dimmed()));
        }
        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_human(&self, verdict: &Verdict) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Region Gate"));
        output.push('\n');

        let decision = if verdict.allowed {
            "ALLOWED".green().bold()
        } else {
            "BLOCKED".red().bold()
        };
        output.push_str(&format!("\n{} {}\n\n", "Verdict:".cyan().bold(), decision));

        output.push_str(&format!("{}\n", "Checks:".cyan().bold()));
        for outcome in &verdict.outcomes {
            output.push_str(&Self::outcome_line(outcome));
            output.push('\n');
        }

        if verdict.is_blocked() {
            let mut causes: Vec<&str> = verdict
                .blocking_outcomes()
                .map(|o| o.kind.as_str())
                .collect();
            if verdict.forced {
                causes.insert(0, "policy override");
            }
            output.push_str(&format!(
                "\n{} {}\n",
                "Blocked by:".red().bold(),
                causes.join(", ")
            ));
        }

        if verdict.defaulted {
            output.push_str(&format!(
                "\n{}\n",
                "No checks were configured; all checks were run.".yellow()
            ));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Evaluated at:".dimmed(),
            verdict.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output
    }

    fn format_json(&self, verdict: &Verdict) -> String {
        serde_json::to_string_pretty(verdict).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_plain(&self, verdict: &Verdict) -> String {
        let mut output = String::from(match (verdict.allowed, verdict.forced) {
            (true, _) => "allowed",
            (false, true) => "blocked\tforced",
            (false, false) => "blocked",
        });
        output.push('\n');
        for outcome in &verdict.outcomes {
            output.push_str(&format!(
                "{}\t{}\t{}\n",
                outcome.kind.as_str(),
                outcome.result.as_str(),
                outcome.observed.as_deref().unwrap_or("-")
            ));
        }
        output
    }
}

/// Single-character marker for a check result
pub fn result_glyph(result: SignalResult) -> ColoredString {
    match result {
        SignalResult::Allowed => "●".green(),
        SignalResult::NotAllowed => "○".red(),
        SignalResult::Unknown => "?".yellow(),
    }
}

fn result_label(result: SignalResult) -> ColoredString {
    match result {
        SignalResult::Allowed => result.as_str().green(),
        SignalResult::NotAllowed => result.as_str().red(),
        SignalResult::Unknown => result.as_str().yellow(),
    }
}
