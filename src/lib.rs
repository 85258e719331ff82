//! Weather dashboard service
//!
//! Current weather for a fixed list of cities and for map-selected points,
//! proxied from OpenWeather. The crate provides the city-file parser,
//! coordinate validation, the upstream fetcher with its freshness window,
//! and the axum HTTP API.

pub mod api;
pub mod cache;
pub mod cities;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod validation;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use cache::FreshnessCache;
pub use cities::{CityParser, load_cities, parse_cities};
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use models::{City, WeatherCardData, WeatherResponse};
pub use validation::{parse_coordinate_params, validate_coordinates};
pub use weather::{OpenWeatherFetcher, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
