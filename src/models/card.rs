//! Display composition of a place and its current weather

use serde::Serialize;

use super::{City, WeatherResponse, city::format_coordinates};

/// One dashboard card: a predefined city or a map-selected point
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCardData {
    pub city_name: String,
    pub weather: WeatherResponse,
    pub is_custom: bool,
}

impl WeatherCardData {
    /// Card for one of the predefined cities
    #[must_use]
    pub fn for_city(city: &City, weather: WeatherResponse) -> Self {
        Self {
            city_name: city.name().to_string(),
            weather,
            is_custom: false,
        }
    }

    /// Card for a custom location, named by its coordinates
    #[must_use]
    pub fn custom(lat: f64, lon: f64, weather: WeatherResponse) -> Self {
        Self {
            city_name: format_coordinates(lat, lon),
            weather,
            is_custom: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather() -> WeatherResponse {
        serde_json::from_value(json!({
            "name": "Madrid",
            "main": { "temp": 21.0, "feels_like": 20.5, "humidity": 40 },
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_card_serializes_camel_case() {
        let city = City::new("Madrid", 40.4168, 3.7038).unwrap();
        let card = WeatherCardData::for_city(&city, weather());
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["cityName"], "Madrid");
        assert_eq!(value["isCustom"], false);
        assert_eq!(value["weather"]["main"]["humidity"], 40);
    }

    #[test]
    fn test_custom_card_is_named_by_coordinates() {
        let card = WeatherCardData::custom(-0.22331, -78.51409, weather());
        assert!(card.is_custom);
        assert_eq!(card.city_name, "-0.2233, -78.5141");
    }
}
