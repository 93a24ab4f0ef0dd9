//! Remote service configuration from TOML (`[geocoding]` and `[network]`)

use crate::geocoding::{DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_NOMINATIM_TIMEOUT};
use crate::ip::{DEFAULT_IP_API_ENDPOINT, DEFAULT_IP_API_TIMEOUT};
use region_gate_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw reverse geocoding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeocodingConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for FileGeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NOMINATIM_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_NOMINATIM_TIMEOUT.as_secs(),
        }
    }
}

impl FileGeocodingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        validate_endpoint("geocoding", &self.endpoint, self.timeout_secs)
    }
}

/// Raw IP geolocation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNetworkConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for FileNetworkConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IP_API_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_IP_API_TIMEOUT.as_secs(),
        }
    }
}

impl FileNetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        validate_endpoint("network", &self.endpoint, self.timeout_secs)
    }
}

fn validate_endpoint(section: &str, endpoint: &str, timeout_secs: u64) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let has_host = ["http://", "https://"]
        .iter()
        .filter_map(|scheme| endpoint.strip_prefix(scheme))
        .any(|rest| !rest.is_empty() && !rest.starts_with('/'));
    if !has_host {
        let field = format!("{}.endpoint", section);
        issues.push(ConfigIssue::error(
            ConfigIssueCode::InvalidEndpoint {
                field: field.clone(),
                value: endpoint.to_string(),
            },
            format!("{}: '{}' is not an http(s) URL", field, endpoint),
        ));
    }

    if timeout_secs == 0 {
        let field = format!("{}.timeout_secs", section);
        issues.push(ConfigIssue::error(
            ConfigIssueCode::ZeroTimeout {
                field: field.clone(),
            },
            format!("{} cannot be 0", field),
        ));
    }

    issues
}
