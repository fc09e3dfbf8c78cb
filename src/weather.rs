//! Weather API client for weatherapi.com-style endpoints
//!
//! One GET per question, no retries and no caching. Transport and decoding
//! failures surface as `Request Error`; a payload without the expected
//! `current` fields surfaces as `Response Error`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, WeatherReport};
use crate::{PogodaError, Result};

/// Anything that can answer "what is the weather in this city"
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Formatted report for `city`
    async fn fetch_weather(&self, city: &str) -> Result<String>;
}

/// The part of the API response the report needs
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentConditions,
}

/// Render the report for `city` from a raw API payload
pub fn form_response(city: &str, data: &Value) -> Result<String> {
    let response = CurrentResponse::deserialize(data).map_err(|e| {
        warn!("Unexpected weather payload: {}", e);
        PogodaError::response()
    })?;
    Ok(WeatherReport::new(city, response.current).to_string())
}

/// HTTP client for the current-conditions endpoint
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PogodaError::config("Weather API key is required"))?;

        let mut builder = Client::builder().user_agent(concat!("Pogoda/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| PogodaError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            language: config.language.clone(),
        })
    }

    fn request_url(&self, city: &str) -> String {
        format!(
            "{}?q={}&key={}&lang={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        )
    }

    /// Raw JSON payload for `city`
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, city: &str) -> Result<Value> {
        info!("Requesting current weather for '{}'", city);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.request_url(city))
            .send()
            .await
            .map_err(|e| {
                warn!("Weather request failed: {}", e);
                PogodaError::request()
            })?;

        let status = response.status();
        if !status.is_success() {
            // error bodies are JSON too; the formatter rejects them
            warn!("Weather API answered with status {}", status);
        }

        let payload: Value = response.json().await.map_err(|e| {
            warn!("Failed to decode weather response: {}", e);
            PogodaError::request()
        })?;

        debug!(
            "Weather response received in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(payload)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn fetch_weather(&self, city: &str) -> Result<String> {
        let payload = self.fetch_current(city).await?;
        form_response(city, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "location": {"name": "Moscow"},
            "current": {
                "temp_c": 15,
                "humidity": 60,
                "wind_kph": 10,
                "pressure_mb": 1000,
                "condition": {"text": "Clear", "code": 1000}
            }
        })
    }

    #[test]
    fn test_form_response() {
        let report = form_response("Moscow", &sample_payload()).unwrap();
        assert!(report.contains("Moscow"));
        assert!(report.contains("температура: 15 C"));
        assert!(report.contains("влажность: 60 %"));
        assert!(report.contains("скорость ветра: 10 км/ч"));
        assert!(report.contains("давление: 750 мм"));
        assert!(report.ends_with("Clear"));
    }

    #[test]
    fn test_form_response_missing_current() {
        let result = form_response("Moscow", &json!({"location": {"name": "Moscow"}}));
        assert!(matches!(
            result,
            Err(PogodaError::ExternalService {
                reason: crate::error::ServiceFailure::Response
            })
        ));
    }

    #[test]
    fn test_form_response_api_error_body() {
        let body = json!({"error": {"code": 1006, "message": "No matching location found."}});
        assert!(form_response("Атлантида", &body).is_err());
    }

    #[test]
    fn test_form_response_wrong_types() {
        let mut payload = sample_payload();
        payload["current"]["humidity"] = Value::Null;
        assert!(form_response("Moscow", &payload).is_err());

        let mut payload = sample_payload();
        payload["current"]["condition"] = json!("Clear");
        assert!(form_response("Moscow", &payload).is_err());

        assert!(form_response("Moscow", &Value::Null).is_err());
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = WeatherConfig::default();
        assert!(matches!(
            WeatherApiClient::new(&config),
            Err(PogodaError::Config { .. })
        ));
    }

    #[test]
    fn test_request_url_is_encoded() {
        let config = WeatherConfig {
            api_key: Some("secret key".to_string()),
            ..WeatherConfig::default()
        };
        let client = WeatherApiClient::new(&config).unwrap();
        let url = client.request_url("Нижний Новгород");
        assert!(url.starts_with("https://api.weatherapi.com/v1/current.json?q="));
        assert!(url.contains("%D0%9D%D0%B8%D0%B6%D0%BD%D0%B8%D0%B9%20"));
        assert!(url.contains("key=secret%20key"));
        assert!(url.ends_with("lang=ru"));
    }
}
