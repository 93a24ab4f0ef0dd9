//! Positioning configuration from TOML (`[position]` section)

use region_gate_application::AuthorizationStatus;
use region_gate_domain::{ConfigIssue, ConfigIssueCode, Coordinate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const AUTHORIZATION_VALUES: [&str; 5] = [
    "authorized",
    "when_in_use",
    "denied",
    "restricted",
    "not_determined",
];

/// Raw positioning configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePositionConfig {
    /// Whether positioning services are on
    pub enabled: bool,
    /// Current permission state
    pub authorization: String,
    /// How a permission prompt is answered
    pub prompt_response: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Upper bound for the prompt plus the first fix
    pub timeout_secs: u64,
}

impl Default for FilePositionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            authorization: "not_determined".to_string(),
            prompt_response: "denied".to_string(),
            latitude: None,
            longitude: None,
            timeout_secs: 30,
        }
    }
}

impl FilePositionConfig {
    pub fn parse_authorization(&self) -> (AuthorizationStatus, Vec<ConfigIssue>) {
        parse_status("position.authorization", &self.authorization)
    }

    pub fn parse_prompt_response(&self) -> (AuthorizationStatus, Vec<ConfigIssue>) {
        parse_status("position.prompt_response", &self.prompt_response)
    }

    /// The configured fix, if both halves are present and in range
    pub fn parse_coordinate(&self) -> (Option<Coordinate>, Vec<ConfigIssue>) {
        match (self.latitude, self.longitude) {
            (None, None) => (None, vec![]),
            (Some(lat), Some(lon)) => match Coordinate::new(lat, lon) {
                Ok(coordinate) => (Some(coordinate), vec![]),
                Err(e) => (
                    None,
                    vec![ConfigIssue::error(
                        ConfigIssueCode::InvalidCoordinate,
                        format!("position: {}", e),
                    )],
                ),
            },
            _ => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidCoordinate,
                    "position: latitude and longitude must be set together",
                )],
            ),
        }
    }

    pub fn parse_timeout(&self) -> (Duration, Vec<ConfigIssue>) {
        if self.timeout_secs == 0 {
            let issue = ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout {
                    field: "position.timeout_secs".to_string(),
                },
                "position.timeout_secs cannot be 0",
            );
            return (Duration::from_secs(Self::default().timeout_secs), vec![issue]);
        }
        (Duration::from_secs(self.timeout_secs), vec![])
    }
}

/// Unknown values fall back to `denied`
fn parse_status(field: &str, value: &str) -> (AuthorizationStatus, Vec<ConfigIssue>) {
    match value.parse::<AuthorizationStatus>() {
        Ok(status) => (status, vec![]),
        Err(_) => {
            let issue = ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    valid_values: AUTHORIZATION_VALUES.iter().map(|s| s.to_string()).collect(),
                },
                format!("{}: unknown value '{}', falling back to 'denied'", field, value),
            );
            (AuthorizationStatus::Denied, vec![issue])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_deserialize_position_section() {
        let toml_str = r#"
[position]
authorization = "when_in_use"
latitude = 55.75
longitude = 37.62
timeout_secs = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let position = &config.position;

        assert!(position.enabled);
        assert_eq!(
            position.parse_authorization().0,
            AuthorizationStatus::AuthorizedWhenInUse
        );
        assert_eq!(position.parse_prompt_response().0, AuthorizationStatus::Denied);
        assert_eq!(
            position.parse_coordinate().0,
            Some(Coordinate::new(55.75, 37.62).unwrap())
        );
        assert_eq!(position.parse_timeout().0, Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_status_falls_back_to_denied() {
        let config = FilePositionConfig {
            authorization: "sometimes".to_string(),
            ..Default::default()
        };
        let (status, issues) = config.parse_authorization();

        assert_eq!(status, AuthorizationStatus::Denied);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_half_coordinate_is_error() {
        let config = FilePositionConfig {
            latitude: Some(10.0),
            ..Default::default()
        };
        let (coordinate, issues) = config.parse_coordinate();

        assert!(coordinate.is_none());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_out_of_range_coordinate_is_error() {
        let config = FilePositionConfig {
            latitude: Some(91.0),
            longitude: Some(0.0),
            ..Default::default()
        };
        assert_eq!(config.parse_coordinate().1[0].code, ConfigIssueCode::InvalidCoordinate);
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let config = FilePositionConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let (timeout, issues) = config.parse_timeout();

        assert_eq!(timeout, Duration::from_secs(30));
        assert!(issues[0].is_error());
    }
}
