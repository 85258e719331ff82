//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files and environment variables
//! and provides validation for all configuration settings.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the upstream credential when it is not
/// provided through the config file or `WEATHERDASH_WEATHER__API_KEY`.
pub const CREDENTIAL_ENV: &str = "OPENWEATHER_API_KEY";

const ENV_PREFIX: &str = "WEATHERDASH";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Upstream weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Freshness window configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key
    pub api_key: Option<String>,
    /// Current-weather endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Freshness window for upstream payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a payload may be reused for the same coordinates; 0 disables reuse
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Predefined city list
    #[serde(default = "default_cities_file")]
    pub cities_file: PathBuf,
    /// Prebuilt frontend served for non-API paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
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

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_cache_ttl() -> u64 {
    600
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cities_file() -> PathBuf {
    PathBuf::from("cities.txt")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cities_file: default_cities_file(),
            static_dir: None,
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

impl DashboardConfig {
    /// Load configuration from specified path, or the default location when `None`
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::build(config_path, None)?;
        config.apply_credential_fallback(std::env::var(CREDENTIAL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Fill a missing API key from the plain credential variable.
    /// A blank value counts as unset.
    fn apply_credential_fallback(&mut self, value: Option<String>) {
        if self.weather.api_key.is_none() {
            self.weather.api_key = value.filter(|key| !key.trim().is_empty());
        }
    }

    /// Layer defaults, the optional file and environment variables.
    /// `env` replaces the process environment when given.
    fn build(
        config_path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(Self::get_config_path);
        if let Some(config_file) = config_file.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-dashboard").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// An absent key is allowed here; it is reported per request
    fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.trim().is_empty() {
                return Err(DashboardError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(DashboardError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.cache.ttl_seconds > 86_400 {
            return Err(
                DashboardError::config("Cache TTL cannot exceed 86400 seconds (1 day)").into(),
            );
        }

        if self.server.port == 0 {
            return Err(DashboardError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(DashboardError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Whether the upstream credential is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.weather.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5/weather"
        );
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_api_key_is_allowed() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = DashboardConfig::default();
        config.weather.api_key = Some("  ".to_string());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout must be between")
        );
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = DashboardConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_variable_override() {
        let config = DashboardConfig::build(
            Some(PathBuf::from("does-not-exist.toml")),
            Some(env(&[
                ("WEATHERDASH_WEATHER__API_KEY", "test_key_from_env"),
                ("WEATHERDASH_SERVER__PORT", "8080"),
                ("WEATHERDASH_CACHE__TTL_SECONDS", "0"),
            ])),
        )
        .unwrap();

        assert_eq!(
            config.weather.api_key,
            Some("test_key_from_env".to_string())
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.ttl_seconds, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_credential_variable_counts_as_missing() {
        let mut config =
            DashboardConfig::build(Some(PathBuf::from("does-not-exist.toml")), Some(env(&[])))
                .unwrap();
        config.apply_credential_fallback(Some(String::new()));

        assert!(config.weather.api_key.is_none());
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credential_variable_fills_missing_key() {
        let mut config = DashboardConfig::default();
        config.apply_credential_fallback(Some("from_credential_var".to_string()));
        assert_eq!(
            config.weather.api_key,
            Some("from_credential_var".to_string())
        );

        config.apply_credential_fallback(Some("ignored".to_string()));
        assert_eq!(
            config.weather.api_key,
            Some("from_credential_var".to_string())
        );
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[weather]
api_key = "from_file"
timeout_seconds = 5

[server]
cities_file = "data/cities.txt"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config =
            DashboardConfig::build(Some(file.path().to_path_buf()), Some(env(&[]))).unwrap();

        assert_eq!(config.weather.api_key, Some("from_file".to_string()));
        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.server.cities_file, PathBuf::from("data/cities.txt"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.cache.ttl_seconds, 600);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weather-dashboard"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
