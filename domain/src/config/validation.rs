//! Configuration validation for [`RegionPolicy`].
//!
//! Detects policies that are valid to run but can never produce the
//! result the operator most likely wants, and reports them as structured
//! issues with severity levels. Adapters add their own issues (endpoints,
//! timeouts, coordinates) using the same types.
//!
//! # Examples
//!
//! ```
//! use region_gate_domain::RegionPolicy;
//!
//! let issues = RegionPolicy::default().validate();
//! assert!(issues.is_empty());
//! ```

use crate::check::{CheckKind, RegionPolicy};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A check name that does not parse.
    UnknownCheckKind { value: String },
    /// An active check compares against an empty allow-list and will always deny.
    EmptyAllowList { field: String, check: CheckKind },
    /// A code whose case can never match what platforms report.
    NonCanonicalCode { field: String, value: String },
    /// A region or language code that is not a valid code at all.
    InvalidCode { field: String, value: String },
    /// A string that does not parse into the expected enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A coordinate outside the valid range.
    InvalidCoordinate,
    /// An endpoint URL that cannot be used.
    InvalidEndpoint { field: String, value: String },
    /// A timeout of zero seconds.
    ZeroTimeout { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl RegionPolicy {
    /// Validate the policy, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let active = self.active_checks();

        if active.contains(CheckKind::ByLanguage) && self.allowed_languages.is_empty() {
            issues.push(empty_list_issue("allowed_languages", CheckKind::ByLanguage));
        }
        if self.allowed_regions.is_empty()
            && let Some(kind) = active.kinds.iter().find(|k| k.uses_region_list())
        {
            issues.push(empty_list_issue("allowed_regions", *kind));
        }

        for region in &self.allowed_regions {
            if region.chars().any(|c| c.is_ascii_lowercase()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::NonCanonicalCode {
                        field: "allowed_regions".to_string(),
                        value: region.clone(),
                    },
                    format!(
                        "allowed_regions: '{}' contains lower-case letters; region codes are compared case-sensitively and platforms report them upper-case",
                        region
                    ),
                ));
            }
        }
        for language in &self.allowed_languages {
            if language.chars().any(|c| c.is_ascii_uppercase()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::NonCanonicalCode {
                        field: "allowed_languages".to_string(),
                        value: language.clone(),
                    },
                    format!(
                        "allowed_languages: '{}' contains upper-case letters; language codes are compared case-sensitively and platforms report them lower-case",
                        language
                    ),
                ));
            }
        }

        issues
    }
}

fn empty_list_issue(field: &str, check: CheckKind) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::EmptyAllowList {
            field: field.to_string(),
            check,
        },
        format!(
            "{} is empty while the '{}' check is active; that check will never allow",
            field, check
        ),
    )
}
