//! Locale overrides from TOML (`[locale]` section)

use region_gate_domain::{ConfigIssue, ConfigIssueCode, CountryCode, LanguageCode};
use serde::{Deserialize, Serialize};

/// Raw locale overrides; unset fields fall back to the system locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLocaleConfig {
    pub region: Option<String>,
    pub language: Option<String>,
}

impl FileLocaleConfig {
    pub fn parse_region(&self) -> (Option<CountryCode>, Vec<ConfigIssue>) {
        match &self.region {
            None => (None, vec![]),
            Some(value) => match CountryCode::new(value.as_str()) {
                Ok(code) => (Some(code), vec![]),
                Err(e) => (None, vec![invalid_code("locale.region", value, e)]),
            },
        }
    }

    pub fn parse_language(&self) -> (Option<LanguageCode>, Vec<ConfigIssue>) {
        match &self.language {
            None => (None, vec![]),
            Some(value) => match LanguageCode::new(value.as_str()) {
                Ok(code) => (Some(code), vec![]),
                Err(e) => (None, vec![invalid_code("locale.language", value, e)]),
            },
        }
    }

    pub fn has_overrides(&self) -> bool {
        self.region.is_some() || self.language.is_some()
    }
}

fn invalid_code(field: &str, value: &str, error: impl std::fmt::Display) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::InvalidCode {
            field: field.to_string(),
            value: value.to_string(),
        },
        format!("{}: {}; using the system locale instead", field, error),
    )
}
