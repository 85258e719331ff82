//! City model for named geographic coordinates

use std::fmt;

use serde::Serialize;

use crate::validation::validate_coordinates;

/// A named location whose coordinates are always within Earth ranges.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct City {
    name: String,
    lat: f64,
    lon: f64,
}

impl City {
    /// Create a city, refusing coordinates outside the valid ranges
    #[must_use]
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Option<Self> {
        validate_coordinates(lat, lon).then(|| Self {
            name: name.into(),
            lat,
            lon,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in decimal degrees, negative south of the equator
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees, negative west of Greenwich
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format_coordinates(self.lat, self.lon)
    }
}

/// Decimal rendering used for custom (map-selected) locations
#[must_use]
pub fn format_coordinates(lat: f64, lon: f64) -> String {
    format!("{lat:.4}, {lon:.4}")
}

/// Renders the line format of the city file: `Quito=0.2233° S, 78.5141° W`
impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{}={:.4}° {}, {:.4}° {}",
            self.name,
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}
