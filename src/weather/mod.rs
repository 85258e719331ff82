//! Upstream weather access
//!
//! [`WeatherSource`] is the seam between the HTTP layer and the upstream
//! service; [`OpenWeatherFetcher`] is the production implementation.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::Result;
use crate::models::WeatherResponse;

pub mod openweather;

pub use openweather::OpenWeatherFetcher;

/// Something that can return current weather for a validated coordinate pair
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherResponse>;
}
