//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Values stay as plain strings and numbers here; the `parse_*` methods turn
//! them into domain types and report what they could not use.

mod endpoints;
mod locale;
mod output;
mod policy;
mod position;

pub use endpoints::{FileGeocodingConfig, FileNetworkConfig};
pub use locale::FileLocaleConfig;
pub use output::FileOutputConfig;
pub use policy::FilePolicyConfig;
pub use position::FilePositionConfig;

use region_gate_domain::{ConfigIssue, RegionPolicy};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Active checks and allow-lists
    pub policy: FilePolicyConfig,
    /// Overrides for the detected locale
    pub locale: FileLocaleConfig,
    /// Positioning platform settings
    pub position: FilePositionConfig,
    /// Reverse geocoder settings
    pub geocoding: FileGeocodingConfig,
    /// IP geolocation settings
    pub network: FileNetworkConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings describe settings
    /// that work but will probably not do what was intended.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Policy: check names, then the policy itself
        let (policy, policy_issues) = self.policy.to_policy();
        issues.extend(policy_issues);
        issues.extend(policy.validate());

        // 2. Locale overrides
        issues.extend(self.locale.parse_region().1);
        issues.extend(self.locale.parse_language().1);

        // 3. Positioning
        issues.extend(self.position.parse_authorization().1);
        issues.extend(self.position.parse_prompt_response().1);
        issues.extend(self.position.parse_coordinate().1);
        issues.extend(self.position.parse_timeout().1);

        // 4. Remote services
        issues.extend(self.geocoding.validate());
        issues.extend(self.network.validate());

        issues
    }

    /// Build the domain policy; issues are the same ones `validate` reports
    pub fn to_policy(&self) -> (RegionPolicy, Vec<ConfigIssue>) {
        let (policy, mut issues) = self.policy.to_policy();
        issues.extend(policy.validate());
        (policy, issues)
    }
}
