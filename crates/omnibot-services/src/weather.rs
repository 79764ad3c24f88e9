//! Current-weather lookup.
//!
//! Wraps the OpenWeather current-weather endpoint (metric units). The
//! provider reports lookup failures through its own `cod` field, which maps
//! to [`ServiceError::NotFound`] so callers can distinguish "no such city"
//! from a failed fetch. A missing or empty API key disables the feature
//! before any request is made.

use std::time::Duration;

use crate::error::ServiceError;

const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One current-conditions observation.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub temp_c: f64,
    pub humidity: i64,
    pub description: String,
}

/// Client for city-keyed weather lookups.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl WeatherClient {
    /// Creates a client; `None` or an empty key disables the feature.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Whether lookups are possible at all.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches current conditions for `city`.
    pub async fn current(&self, city: &str) -> Result<WeatherReport, ServiceError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ServiceError::Disabled("weather"));
        };

        let url = format!(
            "{WEATHER_ENDPOINT}?q={}&appid={key}&units=metric",
            urlencoding::encode(city)
        );

        let json: serde_json::Value = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        // The provider signals lookup failure in-band; `cod` is a number on
        // success and a string on errors.
        let found = json["cod"].as_i64() == Some(200) || json["cod"].as_str() == Some("200");
        if !found {
            return Err(ServiceError::NotFound);
        }

        Ok(WeatherReport {
            temp_c: json["main"]["temp"]
                .as_f64()
                .ok_or_else(|| ServiceError::Malformed("missing main.temp".into()))?,
            humidity: json["main"]["humidity"].as_i64().unwrap_or(0),
            description: json["weather"][0]["description"]
                .as_str()
                .unwrap_or("")
                .to_string(),
        })
    }
}
