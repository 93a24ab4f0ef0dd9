//! CLI entrypoint for region-gate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod wiring;

use anyhow::{Result, bail};
use clap::Parser;
use region_gate_application::{
    CheckProgressNotifier, EvaluateRegionInput, EvaluateRegionUseCase, NoProgress,
};
use region_gate_domain::{ConfigIssue, Coordinate, OutputFormat};
use region_gate_infrastructure::ConfigLoader;
use region_gate_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_ALLOWED: u8 = 0;
const EXIT_BLOCKED: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return ExitCode::from(EXIT_ALLOWED);
    }

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` wins over `-v` when set. Logs go to stderr so stdout only
/// carries the verdict; with `--log-dir` they are also written to a
/// daily-rotated file.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "region-gate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).init();
            None
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    info!("Starting region-gate");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    report_issues(&config.validate())?;

    let (mut policy, _) = config.to_policy();
    if cli.has_policy_overrides() {
        cli.apply_overrides(&mut policy);
        report_issues(&policy.validate())?;
    }

    let coordinate = cli
        .coordinate()
        .map(|(lat, lon)| Coordinate::new(lat, lon))
        .transpose()?;

    let position_timeout = match cli.position_timeout {
        Some(0) => bail!("--position-timeout cannot be 0"),
        Some(secs) => Duration::from_secs(secs),
        None => config.position.parse_timeout().0,
    };

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let sources = wiring::build_sources(&config, position_timeout)?;

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling evaluation");
                token.cancel();
            }
        });
    }

    let use_case = EvaluateRegionUseCase::new(sources, policy);

    let mut input = EvaluateRegionInput::new().with_cancellation(token);
    if let Some(coordinate) = coordinate {
        input = input.with_coordinate(coordinate);
    }

    // Execute with or without progress reporting
    let progress: Box<dyn CheckProgressNotifier> = if cli.quiet || format != OutputFormat::Human
    {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let verdict = match use_case.execute_with_progress(input, progress.as_ref()).await {
        Ok(verdict) => verdict,
        Err(e) => {
            eprintln!("{}; not allowed", e);
            return Ok(EXIT_BLOCKED);
        }
    };

    // Output results
    print!("{}", ConsoleFormatter.format(&verdict, format));
    if format == OutputFormat::Json {
        println!();
    }

    Ok(if verdict.is_blocked() {
        EXIT_BLOCKED
    } else {
        EXIT_ALLOWED
    })
}

/// Log warnings, fail on errors
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }

    let errors: Vec<&ConfigIssue> = issues.iter().filter(|i| i.is_error()).collect();
    if errors.is_empty() {
        return Ok(());
    }
    for issue in &errors {
        eprintln!("  {}", issue.message);
    }
    bail!("{} configuration error(s)", errors.len())
}
