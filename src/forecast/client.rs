//! Blocking HTTP client for the city forecast service.

use crate::{
    error::{ChartError, Result},
    forecast::{
        city::{CityDirectory, CityLookup},
        parse_forecast, ForecastDay,
    },
};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Forecast service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Base URL of the forecast service; the city code is appended as the last
    /// path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://t.weather.itboy.net/api/weather/city".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// A synchronous forecast fetcher. One GET per call, no retries.
#[derive(Debug)]
pub struct ForecastClient {
    client: reqwest::blocking::Client,
    config: ForecastConfig,
}

impl ForecastClient {
    /// Create a client with the given configuration.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ForecastClient { client, config })
    }

    /// Create a client with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ForecastConfig::default())
    }

    fn forecast_url(&self, city_code: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), city_code)
    }

    /// Fetch and parse the forecast for a provider city code.
    pub fn fetch_by_code(&self, city_code: &str) -> Result<Vec<ForecastDay>> {
        let url = self.forecast_url(city_code);
        debug!("fetching forecast from {}", url);

        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Http(format!("HTTP {} from {}", status, url)));
        }

        let body = response.text()?;
        parse_forecast(&body)
    }

    /// Fetch the forecast for a city by name, resolving the code through the
    /// directory first.
    ///
    /// An unknown name fails here, before any request is made.
    pub fn fetch_by_name(&self, directory: &CityDirectory, city_name: &str) -> Result<Vec<ForecastDay>> {
        match directory.lookup(city_name) {
            CityLookup::Found(code) => self.fetch_by_code(&code),
            CityLookup::Unknown => Err(ChartError::UnknownCity(city_name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.base_url, "http://t.weather.itboy.net/api/weather/city");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ForecastConfig = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(config.base_url, ForecastConfig::default().base_url);

        let config: ForecastConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:9000", "timeout_secs": 5}"#)
                .expect("should deserialize");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn builds_forecast_url() {
        let client = ForecastClient::with_defaults().expect("client should build");
        assert_eq!(
            client.forecast_url("101190101"),
            "http://t.weather.itboy.net/api/weather/city/101190101"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = ForecastClient::new(ForecastConfig {
            base_url: "http://localhost:9000/api/".to_owned(),
            ..ForecastConfig::default()
        })
        .expect("client should build");
        assert_eq!(client.forecast_url("42"), "http://localhost:9000/api/42");
    }

    #[test]
    fn unknown_city_fails_before_any_request() {
        let directory = CityDirectory::from_json(
            r#"{"城市代码": [{"市": [{"市名": "南京", "编码": "101190101"}]}]}"#,
        )
        .expect("should parse");

        // Point the client at a closed port; if the lookup guard works no
        // request is ever attempted and we get UnknownCity, not an IO error.
        let client = ForecastClient::new(ForecastConfig {
            base_url: "http://127.0.0.1:1".to_owned(),
            timeout_secs: 1,
        })
        .expect("client should build");

        match client.fetch_by_name(&directory, "亚特兰蒂斯") {
            Err(ChartError::UnknownCity(name)) => assert_eq!(name, "亚特兰蒂斯"),
            other => panic!("expected UnknownCity, got {:?}", other.map(|_| ())),
        }
    }
}
