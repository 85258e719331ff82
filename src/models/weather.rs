//! Current-weather payload as returned by OpenWeather
//!
//! The payload is kept as the raw JSON document so it is forwarded byte-for-byte
//! equivalent. Deserialization still checks the fields the dashboard reads.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value;

/// Upstream current-weather payload
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResponse {
    raw: Value,
    summary: Summary,
}

/// Typed view over the fields the dashboard displays
#[derive(Debug, Deserialize, Clone, PartialEq)]
struct Summary {
    /// Empty over open sea
    #[serde(default)]
    name: String,
    main: MainReadings,
    weather: Vec<Condition>,
}

/// Temperature and humidity block, metric units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MainReadings {
    /// Temperature in Celsius
    pub temp: f64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

/// Weather condition entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Condition code
    pub id: u32,
    /// Condition group, e.g. "Rain"
    pub main: String,
    pub description: String,
    /// Icon identifier, e.g. "10d"
    pub icon: String,
}

impl WeatherResponse {
    /// Validate a raw payload against the expected shape
    pub fn from_value(raw: Value) -> serde_json::Result<Self> {
        let summary = Summary::deserialize(&raw)?;
        Ok(Self { raw, summary })
    }

    /// Place name reported by the upstream service
    #[must_use]
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    #[must_use]
    pub fn main(&self) -> &MainReadings {
        &self.summary.main
    }

    /// Primary weather condition
    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.summary.weather.first()
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.summary.main.temp)
    }
}

impl Serialize for WeatherResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeatherResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(D::Error::custom)
    }
}

impl Condition {
    /// OpenWeather CDN URL for this condition's icon
    #[must_use]
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}
