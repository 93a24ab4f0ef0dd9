//! Region policy: which checks run and what they accept

use super::kind::CheckKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Regions allowed out of the box
pub const DEFAULT_ALLOWED_REGIONS: [&str; 2] = ["RU", "BY"];

/// Languages allowed out of the box
pub const DEFAULT_ALLOWED_LANGUAGES: [&str; 2] = ["ru", "be"];

/// Configuration for a region evaluation
///
/// Holds the active check set and the allow-lists the checks compare
/// against. Codes are compared case-sensitively. An empty allow-list
/// under an active check never allows. `force_blocked` makes every
/// verdict "not allowed" while the checks still run and are reported.
///
/// # Example
///
/// ```
/// use region_gate_domain::{CheckKind, RegionPolicy};
///
/// let policy = RegionPolicy::new()
///     .with_checks([CheckKind::ByRegion, CheckKind::ByLanguage])
///     .with_allowed_regions(["DE", "AT"])
///     .with_allowed_languages(["de"]);
///
/// assert!(policy.allows_region("DE"));
/// assert!(!policy.allows_region("de"));
/// assert_eq!(policy.active_checks().kinds.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionPolicy {
    /// Checks to run; empty means "all checks"
    pub check_methods: BTreeSet<CheckKind>,
    /// Region (country) codes that count as allowed
    pub allowed_regions: Vec<String>,
    /// Language codes that count as allowed
    pub allowed_languages: Vec<String>,
    /// Block regardless of what the checks report
    pub force_blocked: bool,
}

/// The resolved, never-empty set of checks for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChecks {
    /// Checks to run, in canonical order
    pub kinds: Vec<CheckKind>,
    /// True when the configured set was empty and all checks were substituted
    pub defaulted: bool,
}

impl ActiveChecks {
    pub fn contains(&self, kind: CheckKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl Default for RegionPolicy {
    fn default() -> Self {
        Self {
            check_methods: CheckKind::ALL.into_iter().collect(),
            allowed_regions: DEFAULT_ALLOWED_REGIONS.iter().map(|s| s.to_string()).collect(),
            allowed_languages: DEFAULT_ALLOWED_LANGUAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            force_blocked: false,
        }
    }
}

impl RegionPolicy {
    /// Create a policy with the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with no checks and empty allow-lists
    pub fn empty() -> Self {
        Self {
            check_methods: BTreeSet::new(),
            allowed_regions: Vec::new(),
            allowed_languages: Vec::new(),
            force_blocked: false,
        }
    }

    /// Replace the active check set
    pub fn with_checks(mut self, checks: impl IntoIterator<Item = CheckKind>) -> Self {
        self.check_methods = checks.into_iter().collect();
        self
    }

    /// Replace the allowed regions, keeping first-seen order
    pub fn with_allowed_regions<S: Into<String>>(
        mut self,
        regions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.allowed_regions = dedup_ordered(regions);
        self
    }

    /// Replace the allowed languages, keeping first-seen order
    pub fn with_allowed_languages<S: Into<String>>(
        mut self,
        languages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.allowed_languages = dedup_ordered(languages);
        self
    }

    pub fn with_force_blocked(mut self, force_blocked: bool) -> Self {
        self.force_blocked = force_blocked;
        self
    }

    /// Add a single allowed region if not already present
    pub fn allow_region(&mut self, region: impl Into<String>) {
        let region = region.into();
        if !self.allowed_regions.contains(&region) {
            self.allowed_regions.push(region);
        }
    }

    /// Add a single allowed language if not already present
    pub fn allow_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if !self.allowed_languages.contains(&language) {
            self.allowed_languages.push(language);
        }
    }

    /// Resolve the checks to run for an evaluation
    ///
    /// An empty configured set resolves to every check kind.
    pub fn active_checks(&self) -> ActiveChecks {
        if self.check_methods.is_empty() {
            ActiveChecks {
                kinds: CheckKind::ALL.to_vec(),
                defaulted: true,
            }
        } else {
            ActiveChecks {
                kinds: self.check_methods.iter().copied().collect(),
                defaulted: false,
            }
        }
    }

    pub fn allows_region(&self, code: &str) -> bool {
        self.allowed_regions.iter().any(|r| r == code)
    }

    pub fn allows_language(&self, code: &str) -> bool {
        self.allowed_languages.iter().any(|l| l == code)
    }
}

fn dedup_ordered<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.into();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RegionPolicy::default();
        assert_eq!(policy.check_methods.len(), 4);
        assert_eq!(policy.allowed_regions, vec!["RU", "BY"]);
        assert_eq!(policy.allowed_languages, vec!["ru", "be"]);
        assert!(!policy.force_blocked);
    }

    #[test]
    fn test_empty_check_set_defaults_to_all() {
        let policy = RegionPolicy::new().with_checks([]);
        let active = policy.active_checks();

        assert!(active.defaulted);
        assert_eq!(active.kinds, CheckKind::ALL.to_vec());
    }

    #[test]
    fn test_configured_checks_are_not_defaulted() {
        let policy = RegionPolicy::new().with_checks([CheckKind::ByIp, CheckKind::ByRegion]);
        let active = policy.active_checks();

        assert!(!active.defaulted);
        assert_eq!(active.kinds, vec![CheckKind::ByRegion, CheckKind::ByIp]);
        assert!(!active.contains(CheckKind::ByLocation));
    }

    #[test]
    fn test_allow_lists_are_case_sensitive() {
        let policy = RegionPolicy::new();
        assert!(policy.allows_region("RU"));
        assert!(!policy.allows_region("ru"));
        assert!(policy.allows_language("be"));
        assert!(!policy.allows_language("BE"));
    }

    #[test]
    fn test_empty_allow_list_never_allows() {
        let policy = RegionPolicy::empty();
        assert!(!policy.allows_region("RU"));
        assert!(!policy.allows_region(""));
        assert!(!policy.allows_language("ru"));
    }

    #[test]
    fn test_allow_lists_dedup_in_order() {
        let mut policy = RegionPolicy::empty().with_allowed_regions(["DE", "AT", "DE", "CH"]);
        assert_eq!(policy.allowed_regions, vec!["DE", "AT", "CH"]);

        policy.allow_region("AT");
        policy.allow_region("LI");
        assert_eq!(policy.allowed_regions, vec!["DE", "AT", "CH", "LI"]);

        policy.allow_language("de");
        policy.allow_language("de");
        assert_eq!(policy.allowed_languages, vec!["de"]);
    }

    #[test]
    fn test_deserialize_partial_policy() {
        let json = r#"{ "check_methods": ["ip", "region"] }"#;
        let policy: RegionPolicy = serde_json::from_str(json).unwrap();

        assert_eq!(policy.active_checks().kinds, vec![CheckKind::ByRegion, CheckKind::ByIp]);
        assert_eq!(policy.allowed_regions, vec!["RU", "BY"]);
        assert!(!policy.force_blocked);

        let forced: RegionPolicy = serde_json::from_str(r#"{ "force_blocked": true }"#).unwrap();
        assert!(forced.force_blocked);
        assert_eq!(forced.check_methods.len(), 4);
    }
}
