//! CLI command definitions

use clap::{Parser, ValueEnum};
use region_gate_domain::{CheckKind, RegionPolicy};
use std::path::PathBuf;

/// Output format for the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored summary with one line per check
    Human,
    /// The full verdict as JSON
    Json,
    /// `allowed` or `blocked`, then one tab-separated line per check
    Plain,
}

impl From<OutputFormat> for region_gate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => region_gate_domain::OutputFormat::Human,
            OutputFormat::Json => region_gate_domain::OutputFormat::Json,
            OutputFormat::Plain => region_gate_domain::OutputFormat::Plain,
        }
    }
}

/// CLI arguments for region-gate
#[derive(Parser, Debug)]
#[command(name = "region-gate")]
#[command(author, version, about = "Decide whether this device is in an allowed region")]
#[command(long_about = r#"
region-gate combines up to four independent signals into one allow/deny verdict:

  language  the device language is in the allowed languages
  region    the device region is in the allowed regions
  location  a position fix reverse-geocodes to an allowed region
  ip        the public IP address geolocates to an allowed region

Every selected check must pass. A signal that cannot be read counts as a failure.

Configuration files are loaded from (in priority order):
1. REGION_GATE_*              Environment (e.g. REGION_GATE_POLICY__CHECKS='["ip"]')
2. --config <path>            Explicit config file
3. ./region-gate.toml         Project-level config
4. ~/.config/region-gate/config.toml   Global config

Exit status: 0 allowed, 1 blocked, 2 configuration error.

Example:
  region-gate
  region-gate -c region -c ip --allow-region DE --allow-region AT
  region-gate -c location --lat 55.75 --lon 37.62 -o json
"#)]
pub struct Cli {
    /// Checks to run (can be specified multiple times; replaces configured checks)
    #[arg(short, long = "check", value_name = "KIND")]
    pub checks: Vec<CheckKind>,

    /// Allowed region code (can be specified multiple times; replaces configured list)
    #[arg(long = "allow-region", value_name = "CODE")]
    pub allow_regions: Vec<String>,

    /// Allowed language code (can be specified multiple times; replaces configured list)
    #[arg(long = "allow-language", value_name = "CODE")]
    pub allow_languages: Vec<String>,

    /// Report blocked regardless of the check results (checks still run)
    #[arg(long)]
    pub force_block: bool,

    /// Latitude of a known position (skips positioning for the location check)
    #[arg(long, value_name = "DEG", requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of a known position
    #[arg(long, value_name = "DEG", requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Seconds to wait for a position fix, including the permission prompt
    #[arg(long, value_name = "SECS")]
    pub position_timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of the configured policy
    ///
    /// Each list given on the command line replaces its configured
    /// counterpart; lists not given are left alone.
    pub fn apply_overrides(&self, policy: &mut RegionPolicy) {
        if !self.checks.is_empty() {
            policy.check_methods = self.checks.iter().copied().collect();
        }
        if !self.allow_regions.is_empty() {
            policy.allowed_regions.clear();
            for region in &self.allow_regions {
                policy.allow_region(region.as_str());
            }
        }
        if !self.allow_languages.is_empty() {
            policy.allowed_languages.clear();
            for language in &self.allow_languages {
                policy.allow_language(language.as_str());
            }
        }
        if self.force_block {
            policy.force_blocked = true;
        }
    }

    /// Whether any policy list was given on the command line
    pub fn has_policy_overrides(&self) -> bool {
        !self.checks.is_empty()
            || !self.allow_regions.is_empty()
            || !self.allow_languages.is_empty()
            || self.force_block
    }

    /// The pre-fetched coordinate as raw degrees, when both halves are given
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["region-gate"]).unwrap();
        assert!(cli.checks.is_empty());
        assert_eq!(cli.output, None);
        assert_eq!(cli.coordinate(), None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_repeated_checks_and_lists() {
        let cli = Cli::try_parse_from([
            "region-gate",
            "-c",
            "region",
            "--check",
            "by_ip",
            "--allow-region",
            "DE",
            "--allow-region",
            "AT",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.checks, vec![CheckKind::ByRegion, CheckKind::ByIp]);
        assert_eq!(cli.allow_regions, vec!["DE", "AT"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_check_is_rejected() {
        assert!(Cli::try_parse_from(["region-gate", "-c", "bluetooth"]).is_err());
    }

    #[test]
    fn test_negative_coordinate() {
        let cli =
            Cli::try_parse_from(["region-gate", "--lat", "-33.86", "--lon", "151.21"]).unwrap();
        assert_eq!(cli.coordinate(), Some((-33.86, 151.21)));
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(Cli::try_parse_from(["region-gate", "--lat", "10"]).is_err());
    }

    #[test]
    fn test_output_format() {
        let cli = Cli::try_parse_from(["region-gate", "-o", "json"]).unwrap();
        assert_eq!(
            cli.output.map(Into::into),
            Some(region_gate_domain::OutputFormat::Json)
        );
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "region-gate",
            "-c",
            "language",
            "--allow-language",
            "kk",
            "--allow-language",
            "kk",
        ])
        .unwrap();
        let mut policy = RegionPolicy::default();
        cli.apply_overrides(&mut policy);

        assert_eq!(policy.active_checks().kinds, vec![CheckKind::ByLanguage]);
        assert_eq!(policy.allowed_languages, vec!["kk"]);
        // Not given on the command line
        assert_eq!(policy.allowed_regions, vec!["RU", "BY"]);
    }

    #[test]
    fn test_force_block_override() {
        let cli = Cli::try_parse_from(["region-gate", "--force-block"]).unwrap();
        assert!(cli.has_policy_overrides());

        let mut policy = RegionPolicy::default();
        cli.apply_overrides(&mut policy);
        assert!(policy.force_blocked);
        assert_eq!(policy.allowed_regions, vec!["RU", "BY"]);
    }

    #[test]
    fn test_no_overrides_keeps_policy() {
        let cli = Cli::try_parse_from(["region-gate"]).unwrap();
        assert!(!cli.has_policy_overrides());
        let mut policy = RegionPolicy::default().with_checks([CheckKind::ByIp]);
        cli.apply_overrides(&mut policy);
        assert_eq!(policy, RegionPolicy::default().with_checks([CheckKind::ByIp]));
    }
}
