use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Serialize;
use tokio::task::JoinError;

use crate::{
    DashboardError, Result,
    cities::load_cities,
    dashboard,
    models::{City, WeatherCardData, WeatherResponse},
    validation::parse_coordinate_params,
    weather::WeatherSource,
};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub source: Arc<dyn WeatherSource>,
    pub cities_file: PathBuf,
}

impl AppState {
    pub fn new(source: Arc<dyn WeatherSource>, cities_file: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cities_file: cities_file.into(),
        }
    }

    async fn cities(&self) -> Result<Vec<City>> {
        let path = self.cities_file.clone();
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || load_cities(task_path))
            .await
            .map_err(|e| loader_failure(&path, e))?
    }
}

/// The loader thread died before producing a result
fn loader_failure(path: &Path, err: JoinError) -> DashboardError {
    DashboardError::io(path, std::io::Error::other(format!("city loader task failed: {err}")))
}

/// Raw query text; validation happens in the handler so each failure gets
/// its own message.
#[derive(Debug, Default)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl WeatherQuery {
    /// Keep the first value of each key, ignoring repeats and unknown keys
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut query.lat,
                "lon" => &mut query.lon,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    fn coordinates(&self) -> Result<(f64, f64)> {
        parse_coordinate_params(self.lat.as_deref(), self.lon.as_deref())
    }
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/card", get(get_card))
        .route("/cities", get(get_cities))
        .route("/dashboard", get(get_dashboard))
        .route("/health", get(get_health))
        .with_state(state)
}

// Pairs instead of a struct so a repeated key cannot trip the extractor.
async fn get_weather(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<WeatherResponse>> {
    let (lat, lon) = WeatherQuery::from_pairs(pairs).coordinates()?;
    let weather = state.source.current_weather(lat, lon).await?;
    Ok(Json(weather))
}

/// Card for a map-selected point
async fn get_card(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<WeatherCardData>> {
    let (lat, lon) = WeatherQuery::from_pairs(pairs).coordinates()?;
    let card = dashboard::custom_card(state.source.as_ref(), lat, lon).await?;
    Ok(Json(card))
}

async fn get_cities(State(state): State<AppState>) -> Result<Json<Vec<City>>> {
    Ok(Json(state.cities().await?))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Vec<WeatherCardData>>> {
    let cities = state.cities().await?;
    let cards = dashboard::load_dashboard(state.source.as_ref(), &cities).await?;
    Ok(Json(cards))
}

async fn get_health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: crate::VERSION,
    })
}
