//! Configuration management for `pogoda`
//!
//! Handles loading configuration from files and environment variables,
//! and validates the values the agent depends on.

use crate::PogodaError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "POGODA_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PogodaConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Dialog behaviour
    #[serde(default)]
    pub dialog: DialogConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Endpoint for current conditions
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Language of the condition text
    #[serde(default = "default_weather_language")]
    pub language: String,
    /// Request timeout in seconds; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Dialog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Ask for and resolve a date in every turn
    #[serde(default = "default_resolve_dates")]
    pub resolve_dates: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1/current.json".to_string()
}

fn default_weather_language() -> String {
    "ru".to_string()
}

fn default_resolve_dates() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            language: default_weather_language(),
            timeout_seconds: None,
        }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            resolve_dates: default_resolve_dates(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl PogodaConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // POGODA_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("POGODA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PogodaConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pogoda").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.language.is_empty() {
            self.weather.language = default_weather_language();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_weather_endpoint()?;
        self.validate_logging()?;
        Ok(())
    }

    pub fn validate_api_key(&self) -> Result<()> {
        match self.weather.api_key.as_deref().map(str::trim) {
            None => Err(PogodaError::config(
                "Weather API key is required. Set weather.api_key or POGODA_WEATHER__API_KEY.",
            )
            .into()),
            Some("") => Err(PogodaError::config("Weather API key cannot be empty").into()),
            Some(_) => Ok(()),
        }
    }

    fn validate_weather_endpoint(&self) -> Result<()> {
        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(PogodaError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if let Some(timeout) = self.weather.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(PogodaError::config(
                    "Weather API timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PogodaError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PogodaError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> PogodaConfig {
        let mut config = PogodaConfig::default();
        config.weather.api_key = Some("valid_api_key_123".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = PogodaConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.weatherapi.com/v1/current.json"
        );
        assert_eq!(config.weather.language, "ru");
        assert!(config.weather.timeout_seconds.is_none());
        assert!(config.dialog.resolve_dates);
        assert_eq!(config.logging.level, "warn");
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = PogodaConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key is required"));
    }

    #[test]
    fn test_config_validation_blank_api_key() {
        let mut config = PogodaConfig::default();
        config.weather.api_key = Some("   ".to_string());
        assert!(config.validate_api_key().is_err());
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = valid_config();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = valid_config();
        config.weather.timeout_seconds = Some(500);
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
api_key = "file_key_12345"
base_url = "http://localhost:8080/v1/current.json"

[dialog]
resolve_dates = false
"#
        )
        .unwrap();

        let config = PogodaConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("file_key_12345"));
        assert_eq!(config.weather.base_url, "http://localhost:8080/v1/current.json");
        assert_eq!(config.weather.language, "ru");
        assert!(!config.dialog.resolve_dates);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = PogodaConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("pogoda"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
