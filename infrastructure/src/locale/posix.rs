//! POSIX locale environment (`LC_ALL`, `LC_MESSAGES`, `LANG`)

use region_gate_application::LocaleProvider;
use region_gate_domain::{CountryCode, LanguageCode};
use tracing::debug;

/// Environment variables consulted, highest precedence first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A parsed locale name such as `ru_RU.UTF-8` or `pt-BR`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosixLocale {
    pub language: String,
    pub region: Option<String>,
}

impl PosixLocale {
    /// Parse `language[_territory][.codeset][@modifier]`
    ///
    /// BCP-47 style `ll-RR` is accepted as well. Returns `None` for the
    /// `C` and `POSIX` locales, which carry no language.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let name = value.split(['.', '@']).next().unwrap_or_default();
        if name.is_empty() || name == "C" || name == "POSIX" {
            return None;
        }

        let mut parts = name.splitn(2, ['_', '-']);
        let language = parts.next().filter(|l| !l.is_empty())?;
        let region = parts
            .next()
            .map(|r| r.rsplit(['_', '-']).next().unwrap_or(r))
            .filter(|r| !r.is_empty());

        Some(Self {
            language: language.to_lowercase(),
            region: region.map(str::to_uppercase),
        })
    }
}

/// Locale read from the process environment
pub struct SystemLocale {
    locale: Option<PosixLocale>,
}

impl SystemLocale {
    /// Read the locale from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the locale through `lookup`, using POSIX precedence
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locale = LOCALE_VARS.iter().find_map(|var| {
            let value = lookup(var)?;
            let parsed = PosixLocale::parse(&value);
            if parsed.is_some() {
                debug!("Locale from {}={}", var, value);
            }
            parsed
        });

        if locale.is_none() {
            debug!("No usable locale in {}", LOCALE_VARS.join(", "));
        }

        Self { locale }
    }

    pub fn locale(&self) -> Option<&PosixLocale> {
        self.locale.as_ref()
    }
}

impl LocaleProvider for SystemLocale {
    fn current_region(&self) -> Option<CountryCode> {
        let region = self.locale.as_ref()?.region.as_ref()?;
        CountryCode::new(region.as_str()).ok()
    }

    fn current_language(&self) -> Option<LanguageCode> {
        LanguageCode::new(self.locale.as_ref()?.language.as_str()).ok()
    }
}
