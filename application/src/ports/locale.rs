//! Locale port
//!
//! Synchronous, side-effect-free access to the device locale.

use region_gate_domain::{CountryCode, LanguageCode};

/// Source of the device's current region and language
///
/// Either value may be absent when the platform cannot supply it.
pub trait LocaleProvider: Send + Sync {
    /// Current region code (e.g. "RU")
    fn current_region(&self) -> Option<CountryCode>;

    /// Current language code (e.g. "ru")
    fn current_language(&self) -> Option<LanguageCode>;
}
