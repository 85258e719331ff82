//! Dashboard assembly: weather cards for the predefined cities and for
//! map-selected points.

use futures::future::try_join_all;
use tracing::{info, instrument};

use crate::Result;
use crate::models::{City, WeatherCardData};
use crate::weather::WeatherSource;

/// Fetch weather for every city concurrently.
///
/// The batch fails as a unit: the first error is returned and no partial
/// results are kept. Card order follows `cities`.
#[instrument(skip_all, fields(cities = cities.len()))]
pub async fn load_dashboard(
    source: &dyn WeatherSource,
    cities: &[City],
) -> Result<Vec<WeatherCardData>> {
    let cards = try_join_all(cities.iter().map(|city| async move {
        let weather = source.current_weather(city.lat(), city.lon()).await?;
        Ok::<_, crate::DashboardError>(WeatherCardData::for_city(city, weather))
    }))
    .await?;

    info!("Loaded weather for {} cities", cards.len());
    Ok(cards)
}

/// Card for a custom location. Coordinates must already be validated.
pub async fn custom_card(source: &dyn WeatherSource, lat: f64, lon: f64) -> Result<WeatherCardData> {
    let weather = source.current_weather(lat, lon).await?;
    Ok(WeatherCardData::custom(lat, lon, weather))
}
