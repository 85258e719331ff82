//! Coordinate range checks and inbound parameter validation

use crate::{DashboardError, Result};

pub const MISSING_PARAMS: &str = "Missing required parameters: lat and lon";
pub const INVALID_NUMBERS: &str = "Invalid coordinates: lat and lon must be valid numbers";
pub const INVALID_RANGES: &str =
    "Invalid coordinate ranges: lat must be between -90 and 90, lon must be between -180 and 180";

/// True iff `lat` is in [-90, 90] and `lon` is in [-180, 180], bounds included.
#[must_use]
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Turn raw `lat`/`lon` query text into a validated coordinate pair.
///
/// Checks run in order and the first failure is returned: presence, numeric
/// parse (finite values only), then range.
pub fn parse_coordinate_params(lat: Option<&str>, lon: Option<&str>) -> Result<(f64, f64)> {
    let (Some(lat), Some(lon)) = (non_empty(lat), non_empty(lon)) else {
        return Err(DashboardError::validation(MISSING_PARAMS));
    };

    let (Some(lat), Some(lon)) = (parse_finite(lat), parse_finite(lon)) else {
        return Err(DashboardError::validation(INVALID_NUMBERS));
    };

    if !validate_coordinates(lat, lon) {
        return Err(DashboardError::validation(INVALID_RANGES));
    }

    Ok((lat, lon))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
