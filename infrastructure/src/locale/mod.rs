//! Locale adapters
//!
//! - [`SystemLocale`]: reads the POSIX locale environment
//! - [`StaticLocale`]: fixed values, used for configuration overrides

mod posix;

pub use posix::{PosixLocale, SystemLocale};

use region_gate_application::LocaleProvider;
use region_gate_domain::{CountryCode, LanguageCode};

/// A locale with fixed values
#[derive(Debug, Clone, Default)]
pub struct StaticLocale {
    region: Option<CountryCode>,
    language: Option<LanguageCode>,
}

impl StaticLocale {
    pub fn new(region: Option<CountryCode>, language: Option<LanguageCode>) -> Self {
        Self { region, language }
    }

    /// Fill in whatever is missing here from `fallback`
    pub fn or_else(self, fallback: &dyn LocaleProvider) -> Self {
        Self {
            region: self.region.or_else(|| fallback.current_region()),
            language: self.language.or_else(|| fallback.current_language()),
        }
    }
}

impl LocaleProvider for StaticLocale {
    fn current_region(&self) -> Option<CountryCode> {
        self.region.clone()
    }

    fn current_language(&self) -> Option<LanguageCode> {
        self.language.clone()
    }
}
