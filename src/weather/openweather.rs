//! OpenWeather Current Weather API 2.5 client
//!
//! One request per fetch, no retries. Failures are translated into
//! [`DashboardError`] variants: a missing key is a configuration error raised
//! before any I/O, non-success statuses keep their status and body, and
//! everything the transport throws becomes a uniform transport error.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::WeatherSource;
use crate::cache::FreshnessCache;
use crate::config::{CREDENTIAL_ENV, CacheConfig, WeatherConfig};
use crate::models::WeatherResponse;
use crate::{DashboardError, Result};

/// Fetches current weather from OpenWeather, reusing recent payloads
#[derive(Debug)]
pub struct OpenWeatherFetcher {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    cache: FreshnessCache<WeatherResponse>,
}

impl OpenWeatherFetcher {
    /// Create a fetcher from configuration
    pub fn new(weather: &WeatherConfig, cache: &CacheConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(weather.timeout_seconds.into()))
            .user_agent(concat!("weather-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        let cache = match cache.ttl_seconds {
            0 => FreshnessCache::disabled(),
            ttl => FreshnessCache::new(Duration::from_secs(ttl)),
        };
        debug!(ttl = ?cache.ttl(), enabled = cache.is_enabled(), "Weather freshness window");

        Ok(Self::with_client(
            http,
            weather.base_url.clone(),
            weather.api_key.clone(),
            cache,
        ))
    }

    /// Assemble a fetcher from parts
    #[must_use]
    pub fn with_client(
        http: Client,
        base_url: String,
        api_key: Option<String>,
        cache: FreshnessCache<WeatherResponse>,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            cache,
        }
    }

    /// Current weather for a coordinate pair that has already been validated
    #[instrument(skip(self))]
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DashboardError::config(format!(
                "{CREDENTIAL_ENV} is not defined. Please set it in the environment or the config file."
            ))
        })?;

        let key = FreshnessCache::<WeatherResponse>::coordinate_key(lat, lon);
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Serving weather from freshness window");
            return Ok(cached);
        }

        let weather = self.fetch_upstream(api_key, lat, lon).await?;
        self.cache.put(&key, weather.clone()).await;
        Ok(weather)
    }

    async fn fetch_upstream(&self, api_key: &str, lat: f64, lon: f64) -> Result<WeatherResponse> {
        info!("Getting current weather for coordinates: {:.4}, {:.4}", lat, lon);
        let start_time = Instant::now();
        let (lat, lon) = (lat.to_string(), lon.to_string());

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| DashboardError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "OpenWeather returned an error status");
            return Err(DashboardError::upstream(status.as_u16(), body));
        }

        let weather: WeatherResponse = serde_json::from_str(&body)
            .map_err(|e| DashboardError::transport(format!("invalid weather payload: {e}")))?;

        let total_duration = start_time.elapsed();
        info!(
            "Successfully retrieved current weather in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(weather)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherFetcher {
    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherResponse> {
        self.fetch(lat, lon).await
    }
}
