//! Policy configuration from TOML (`[policy]` section)

use region_gate_domain::{
    CheckKind, ConfigIssue, ConfigIssueCode, RegionPolicy,
    check::{DEFAULT_ALLOWED_LANGUAGES, DEFAULT_ALLOWED_REGIONS},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw policy configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicyConfig {
    /// Check names: "language", "region", "location", "ip"
    pub checks: Vec<String>,
    pub allowed_regions: Vec<String>,
    pub allowed_languages: Vec<String>,
    /// Block regardless of the check results
    pub force_block: bool,
}

impl Default for FilePolicyConfig {
    fn default() -> Self {
        Self {
            checks: CheckKind::ALL.iter().map(|k| k.to_string()).collect(),
            allowed_regions: DEFAULT_ALLOWED_REGIONS.iter().map(|s| s.to_string()).collect(),
            allowed_languages: DEFAULT_ALLOWED_LANGUAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            force_block: false,
        }
    }
}

impl FilePolicyConfig {
    /// Parse check names into check kinds
    ///
    /// Unknown names are errors: dropping a check silently would loosen
    /// the gate.
    pub fn parse_checks(&self) -> (BTreeSet<CheckKind>, Vec<ConfigIssue>) {
        let mut kinds = BTreeSet::new();
        let mut issues = Vec::new();

        for name in &self.checks {
            match name.parse::<CheckKind>() {
                Ok(kind) => {
                    kinds.insert(kind);
                }
                Err(_) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownCheckKind {
                        value: name.clone(),
                    },
                    format!(
                        "policy.checks: unknown check '{}' (valid: {})",
                        name,
                        CheckKind::ALL
                            .iter()
                            .map(|k| k.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )),
            }
        }

        (kinds, issues)
    }

    /// Build the domain policy
    pub fn to_policy(&self) -> (RegionPolicy, Vec<ConfigIssue>) {
        let (kinds, issues) = self.parse_checks();
        let policy = RegionPolicy::empty()
            .with_checks(kinds)
            .with_allowed_regions(self.allowed_regions.iter().cloned())
            .with_allowed_languages(self.allowed_languages.iter().cloned())
            .with_force_blocked(self.force_block);
        (policy, issues)
    }
}
