//! Dependency injection: configuration in, signal sources out

use anyhow::{Context, Result};
use region_gate_application::{GeocodeSignal, LocaleProvider, PositionSignal, SignalSources};
use region_gate_infrastructure::{
    ConfiguredPositioning, FileConfig, IpApiClient, NominatimGeocoder, StaticLocale,
    SystemLocale,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Build the four signal sources described by `config`
///
/// Invalid values have already been reported by `FileConfig::validate`;
/// here they fall back the same way the `parse_*` methods describe.
pub fn build_sources(config: &FileConfig, position_timeout: Duration) -> Result<SignalSources> {
    let locale = build_locale(config);

    let platform = ConfiguredPositioning::new(
        config.position.enabled,
        config.position.parse_authorization().0,
        config.position.parse_prompt_response().0,
        config.position.parse_coordinate().0,
    );
    let position = PositionSignal::new(Arc::new(platform)).with_timeout(position_timeout);

    let geocoder = NominatimGeocoder::with_endpoint(
        config.geocoding.endpoint.clone(),
        config.geocoding.timeout(),
    )
    .context("Failed to create reverse geocoder")?;

    let ip = IpApiClient::with_endpoint(config.network.endpoint.clone(), config.network.timeout())
        .context("Failed to create IP geolocation client")?;

    Ok(SignalSources {
        locale,
        position: Arc::new(position),
        geocode: Arc::new(GeocodeSignal::new(Arc::new(geocoder))),
        ip: Arc::new(ip),
    })
}

fn build_locale(config: &FileConfig) -> Arc<dyn LocaleProvider> {
    let system = SystemLocale::from_env();
    if !config.locale.has_overrides() {
        return Arc::new(system);
    }

    debug!("Applying locale overrides from configuration");
    let overrides = StaticLocale::new(
        config.locale.parse_region().0,
        config.locale.parse_language().0,
    );
    Arc::new(overrides.or_else(&system))
}

#[cfg(test)]
mod tests {
    use super::*;
    use region_gate_application::SignalError;
    use region_gate_domain::Coordinate;

    #[test]
    fn test_locale_override_wins() {
        let mut config = FileConfig::default();
        config.locale.region = Some("KZ".to_string());
        config.locale.language = Some("kk".to_string());

        let locale = build_locale(&config);
        assert_eq!(locale.current_region().unwrap().as_str(), "KZ");
        assert_eq!(locale.current_language().unwrap().as_str(), "kk");
    }

    #[tokio::test]
    async fn test_configured_position_is_used() {
        let mut config = FileConfig::default();
        config.position.authorization = "authorized".to_string();
        config.position.latitude = Some(53.9);
        config.position.longitude = Some(27.56);

        let sources = build_sources(&config, Duration::from_secs(1)).unwrap();
        assert_eq!(
            sources.position.fetch_position().await,
            Ok(Coordinate::new(53.9, 27.56).unwrap())
        );
        assert_eq!(sources.position.timeout(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_default_position_prompt_is_declined() {
        let sources = build_sources(&FileConfig::default(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            sources.position.fetch_position().await,
            Err(SignalError::PermissionDenied)
        );
    }
}
