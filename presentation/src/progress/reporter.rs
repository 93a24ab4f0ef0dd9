//! Progress reporting for region evaluations

use crate::output::console::result_glyph;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use region_gate_application::CheckProgressNotifier;
use region_gate_domain::{CheckKind, CheckOutcome, Verdict};
use std::sync::{Mutex, PoisonError};

/// Reports progress during an evaluation with a progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
        }
    }

    fn checks_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:24.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckProgressNotifier for ProgressReporter {
    fn on_evaluation_start(&self, checks: &[CheckKind]) {
        let pb = self.multi.add(ProgressBar::new(checks.len() as u64));
        pb.set_style(Self::checks_style());
        pb.set_prefix("Checking");
        pb.set_message(
            checks
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_check_complete(&self, outcome: &CheckOutcome) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            pb.set_message(format!("{} {}", result_glyph(outcome.result), outcome.kind));
            pb.inc(1);
        }
    }

    fn on_evaluation_complete(&self, verdict: &Verdict) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let label = if verdict.allowed {
                "allowed".green()
            } else {
                "blocked".red()
            };
            pb.finish_with_message(format!("{} {}", verdict.summary(), label));
        }
    }

    fn on_evaluation_cancelled(&self) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.abandon_with_message("cancelled".yellow().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl CheckProgressNotifier for SimpleProgress {
    fn on_evaluation_start(&self, checks: &[CheckKind]) {
        eprintln!(
            "{} {} ({} checks)",
            "->".cyan(),
            "Evaluating region".bold(),
            checks.len()
        );
    }

    fn on_check_complete(&self, outcome: &CheckOutcome) {
        match &outcome.reason {
            Some(reason) => eprintln!(
                "  {} {} ({})",
                result_glyph(outcome.result),
                outcome.kind,
                reason
            ),
            None => eprintln!("  {} {}", result_glyph(outcome.result), outcome.kind),
        }
    }

    fn on_evaluation_complete(&self, _verdict: &Verdict) {
        eprintln!();
    }

    fn on_evaluation_cancelled(&self) {
        eprintln!("  {}\n", "cancelled".yellow());
    }
}
