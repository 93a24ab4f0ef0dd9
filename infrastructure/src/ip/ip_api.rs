//! ip-api.com client
//!
//! One GET per lookup, JSON response `{"countryCode": "RU"}`. Any failure
//! (transport, non-2xx, unparseable body, missing or malformed code) is reported as
//! [`SignalError::LookupFailed`] so the check degrades to "unknown".

use async_trait::async_trait;
use region_gate_application::{IpGeolocation, SignalError};
use region_gate_domain::CountryCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default lookup endpoint
pub const DEFAULT_IP_API_ENDPOINT: &str = "http://ip-api.com/json/?fields=countryCode";

/// Default request timeout
pub const DEFAULT_IP_API_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("region-gate/", env!("CARGO_PKG_VERSION"));

/// Errors from an IP geolocation lookup
#[derive(Error, Debug)]
pub enum IpLookupError {
    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response carried no country code")]
    EmptyCountryCode,

    #[error("Invalid country code in response: {0:?}")]
    InvalidCountryCode(String),
}

impl From<IpLookupError> for SignalError {
    fn from(e: IpLookupError) -> Self {
        SignalError::LookupFailed(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

/// Client for the ip-api.com JSON endpoint
pub struct IpApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiClient {
    /// Client for the default endpoint and timeout
    pub fn new() -> Result<Self, IpLookupError> {
        Self::with_endpoint(DEFAULT_IP_API_ENDPOINT, DEFAULT_IP_API_TIMEOUT)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IpLookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform the lookup, keeping the detailed error
    pub async fn fetch_country(&self) -> Result<CountryCode, IpLookupError> {
        debug!("IP lookup: GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpLookupError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        let parsed: IpApiResponse = serde_json::from_str(&body)?;

        let code = parsed
            .country_code
            .filter(|c| !c.trim().is_empty())
            .ok_or(IpLookupError::EmptyCountryCode)?;
        debug!("IP lookup returned {}", code);

        CountryCode::new(code.as_str()).map_err(|_| IpLookupError::InvalidCountryCode(code))
    }
}

fn classify(e: reqwest::Error) -> IpLookupError {
    if e.is_timeout() {
        IpLookupError::Timeout
    } else {
        IpLookupError::Transport(e)
    }
}

#[async_trait]
impl IpGeolocation for IpApiClient {
    async fn lookup_country(&self) -> Result<CountryCode, SignalError> {
        Ok(self.fetch_country().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::{CannedResponse, serve};

    fn client(url: &str) -> IpApiClient {
        IpApiClient::with_endpoint(format!("{}/json/?fields=countryCode", url), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_country() {
        let server = serve(CannedResponse::ok(r#"{"countryCode":"BY"}"#)).await;

        let country = client(&server.url).lookup_country().await.unwrap();
        assert_eq!(country.as_str(), "BY");
        assert_eq!(
            server.first_request_line().as_deref(),
            Some("GET /json/?fields=countryCode HTTP/1.1")
        );
    }

    #[tokio::test]
    async fn test_missing_code() {
        let server = serve(CannedResponse::ok(r#"{"status":"fail"}"#)).await;

        let err = client(&server.url).fetch_country().await.unwrap_err();
        assert!(matches!(err, IpLookupError::EmptyCountryCode));
    }

    #[tokio::test]
    async fn test_empty_code() {
        let server = serve(CannedResponse::ok(r#"{"countryCode":""}"#)).await;

        let err = client(&server.url).fetch_country().await.unwrap_err();
        assert!(matches!(err, IpLookupError::EmptyCountryCode));
    }

    #[tokio::test]
    async fn test_malformed_code() {
        let server = serve(CannedResponse::ok(r#"{"countryCode":"R U"}"#)).await;

        let err = client(&server.url).fetch_country().await.unwrap_err();
        assert!(matches!(&err, IpLookupError::InvalidCountryCode(code) if code == "R U"));
        assert_eq!(
            SignalError::from(err).to_string(),
            "Lookup failed: Invalid country code in response: \"R U\""
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = serve(CannedResponse::status(429, "{}")).await;

        let err = client(&server.url).fetch_country().await.unwrap_err();
        assert!(matches!(err, IpLookupError::Status(429)));
    }

    #[tokio::test]
    async fn test_garbage_body() {
        let server = serve(CannedResponse::ok("<html>captive portal</html>")).await;

        let err = client(&server.url).fetch_country().await.unwrap_err();
        assert!(matches!(err, IpLookupError::Parse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server =
            serve(CannedResponse::ok(r#"{"countryCode":"RU"}"#).delayed(Duration::from_secs(2)))
                .await;
        let client =
            IpApiClient::with_endpoint(server.url.clone(), Duration::from_millis(100)).unwrap();

        let err = client.fetch_country().await.unwrap_err();
        assert!(matches!(err, IpLookupError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_lookup_failed() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client(&url).lookup_country().await.unwrap_err();
        assert!(matches!(err, SignalError::LookupFailed(_)));
    }

    #[test]
    fn test_defaults() {
        let client = IpApiClient::new().unwrap();
        assert_eq!(client.endpoint(), DEFAULT_IP_API_ENDPOINT);
        assert_eq!(DEFAULT_IP_API_TIMEOUT, Duration::from_secs(60));
    }
}
