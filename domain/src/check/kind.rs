//! Check kind value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifies which signal source a check consults (Value Object)
///
/// The declaration order is the canonical evaluation/report order and is
/// what `Ord` (and therefore `BTreeSet<CheckKind>`) follows.
///
/// # Example
///
/// ```
/// use region_gate_domain::CheckKind;
///
/// let kind: CheckKind = "ip".parse().unwrap();
/// assert_eq!(kind, CheckKind::ByIp);
/// assert_eq!(kind.to_string(), "ip");
/// assert!(kind.uses_region_list());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckKind {
    /// Device locale language compared against the allowed languages
    #[serde(rename = "language", alias = "by_language")]
    ByLanguage,
    /// Device locale region compared against the allowed regions
    #[serde(rename = "region", alias = "by_region")]
    ByRegion,
    /// Positioning fix, reverse geocoded to a country
    #[serde(rename = "location", alias = "by_location", alias = "gps")]
    ByLocation,
    /// IP geolocation country
    #[serde(rename = "ip", alias = "by_ip")]
    ByIp,
}

impl CheckKind {
    /// Every check kind in canonical order
    pub const ALL: [CheckKind; 4] = [
        CheckKind::ByLanguage,
        CheckKind::ByRegion,
        CheckKind::ByLocation,
        CheckKind::ByIp,
    ];

    /// Get the string identifier for this check kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::ByLanguage => "language",
            CheckKind::ByRegion => "region",
            CheckKind::ByLocation => "location",
            CheckKind::ByIp => "ip",
        }
    }

    /// Whether this check is compared against the region allow-list
    ///
    /// Location and IP checks produce a country code, so they share the
    /// region list with the locale region check.
    pub fn uses_region_list(&self) -> bool {
        !matches!(self, CheckKind::ByLanguage)
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CheckKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let name = normalized
            .strip_prefix("by_")
            .or_else(|| normalized.strip_prefix("by-"))
            .or_else(|| normalized.strip_prefix("by"))
            .unwrap_or(&normalized);

        match name {
            "language" | "lang" => Ok(CheckKind::ByLanguage),
            "region" => Ok(CheckKind::ByRegion),
            "location" | "gps" => Ok(CheckKind::ByLocation),
            "ip" => Ok(CheckKind::ByIp),
            _ => Err(DomainError::UnknownCheckKind(s.to_string())),
        }
    }
}
