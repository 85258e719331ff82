//! Parser for the predefined city list
//!
//! One city per line: `Quito=0.2233° S, 78.5141° W`. Lines that do not match
//! are dropped without aborting the parse; failing to read the file at all is
//! an error.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::models::City;
use crate::{DashboardError, Result};

const DEGREE: char = '°';

/// Loader for the city text format
pub struct CityParser;

impl CityParser {
    /// Read and parse a city file. The file is read exactly once.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Vec<City>> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| DashboardError::io(path, source))?;

        let cities = Self::parse_cities(&content);
        info!("Loaded {} cities from {}", cities.len(), path.display());
        Ok(cities)
    }

    /// Parse every well-formed line, in input order
    #[must_use]
    pub fn parse_cities(content: &str) -> Vec<City> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| {
                let city = Self::parse_line(line);
                if city.is_none() {
                    debug!(line = index + 1, "Skipping malformed city line");
                }
                city
            })
            .collect()
    }

    /// Parse a single `Name=<lat>, <lon>` line
    #[must_use]
    pub fn parse_line(line: &str) -> Option<City> {
        let (name, coords) = split_exactly_once(line.trim(), '=')?;
        let (lat_text, lon_text) = split_exactly_once(coords.trim(), ',')?;

        let lat = parse_coordinate(lat_text)?;
        let lon = parse_coordinate(lon_text)?;

        City::new(name.trim(), lat, lon)
    }
}

/// Split on `separator`, rejecting text where it appears zero or several times
fn split_exactly_once(text: &str, separator: char) -> Option<(&str, &str)> {
    let (head, tail) = text.split_once(separator)?;
    (!tail.contains(separator)).then_some((head, tail))
}

/// `0.2233° S` -> -0.2233
fn parse_coordinate(text: &str) -> Option<f64> {
    let text = text.trim();

    let mut chars = text.chars();
    let direction = chars.next_back()?;
    let rest = chars.as_str().trim_end();
    let magnitude = rest.strip_suffix(DEGREE)?;

    if magnitude.is_empty() || !magnitude.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let value: f64 = magnitude.parse().ok()?;

    match direction {
        'N' | 'E' => Some(value),
        'S' | 'W' => Some(-value),
        _ => None,
    }
}

/// Convenience wrapper over [`CityParser::parse_cities`]
#[must_use]
pub fn parse_cities(content: &str) -> Vec<City> {
    CityParser::parse_cities(content)
}

/// Convenience wrapper over [`CityParser::load_cities`]
pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Vec<City>> {
    CityParser::load_cities(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EPSILON: f64 = 1e-9;

    fn assert_city(city: &City, name: &str, lat: f64, lon: f64) {
        assert_eq!(city.name(), name);
        assert!((city.lat() - lat).abs() < EPSILON, "lat {} != {}", city.lat(), lat);
        assert!((city.lon() - lon).abs() < EPSILON, "lon {} != {}", city.lon(), lon);
    }

    #[test]
    fn test_parse_southern_western_city() {
        let city = CityParser::parse_line("Quito=0.2233° S, 78.5141° W").unwrap();
        assert_city(&city, "Quito", -0.2233, -78.5141);
    }

    #[test]
    fn test_parse_northern_eastern_city() {
        let city = CityParser::parse_line("Madrid=40.4168° N, 3.7038° E").unwrap();
        assert_city(&city, "Madrid", 40.4168, 3.7038);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let city = CityParser::parse_line("  Buenos Aires = 34.6037°S ,58.3816°   W  ").unwrap();
        assert_city(&city, "Buenos Aires", -34.6037, -58.3816);
    }

    #[rstest]
    #[case("Bad=40.4, 3.7")]
    #[case("NoDegree=40.4 N, 3.7 E")]
    #[case("NoDirection=40.4°, 3.7°")]
    #[case("Lowercase=40.4° n, 3.7° e")]
    #[case("Unknown=40.4° X, 3.7° E")]
    #[case("NoEquals 40.4° N, 3.7° E")]
    #[case("Two=Equals=40.4° N, 3.7° E")]
    #[case("OneCoord=40.4° N")]
    #[case("ThreeCoords=40.4° N, 3.7° E, 1.0° N")]
    #[case("Negative=-40.4° N, 3.7° E")]
    #[case("Dots=1.2.3° N, 3.7° E")]
    #[case("Empty=° N, 3.7° E")]
    #[case("TooFarNorth=95.0° N, 10.0° E")]
    #[case("TooFarWest=10.0° N, 180.5° W")]
    fn test_malformed_lines_are_rejected(#[case] line: &str) {
        assert!(CityParser::parse_line(line).is_none());
    }

    #[test]
    fn test_malformed_lines_do_not_abort_parsing() {
        let content = "Quito=0.2233° S, 78.5141° W\n\
                       Bad=40.4, 3.7\n\
                       \n\
                       Madrid=40.4168° N, 3.7038° E\n";
        let cities = parse_cities(content);

        assert_eq!(cities.len(), 2);
        assert_city(&cities[0], "Quito", -0.2233, -78.5141);
        assert_city(&cities[1], "Madrid", 40.4168, 3.7038);
    }

    #[test]
    fn test_empty_input_yields_no_cities() {
        assert!(parse_cities("").is_empty());
        assert!(parse_cities("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let cities = parse_cities("Quito=0.2233° S, 78.5141° W\r\nMadrid=40.4168° N, 3.7038° E\r\n");
        assert_eq!(cities.len(), 2);
    }

    #[test]
    fn test_load_cities_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Quito=0.2233° S, 78.5141° W").unwrap();
        writeln!(temp_file, "garbage").unwrap();
        writeln!(temp_file, "Tokyo=35.6762° N, 139.6503° E").unwrap();

        let cities = load_cities(temp_file.path()).unwrap();
        assert_eq!(cities.len(), 2);
        assert_city(&cities[1], "Tokyo", 35.6762, 139.6503);
    }

    #[test]
    fn test_file_not_found() {
        let result = load_cities("nonexistent_cities_file.txt");
        let err = result.unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
        assert!(err.to_string().contains("nonexistent_cities_file.txt"));
    }

    #[test]
    fn test_display_round_trip() {
        let cities: Vec<City> = (-9..=9)
            .flat_map(|i| {
                (-9..=9).map(move |j| {
                    let lat = f64::from(i) * 9.87654;
                    let lon = f64::from(j) * 19.98765;
                    City::new(format!("City_{i}_{j}"), lat, lon).unwrap()
                })
            })
            .collect();

        let text: String = cities.iter().map(|c| format!("{c}\n")).collect();
        let parsed = parse_cities(&text);

        assert_eq!(parsed.len(), cities.len());
        for (original, reparsed) in cities.iter().zip(&parsed) {
            assert_eq!(original.name(), reparsed.name());
            assert!((original.lat() - reparsed.lat()).abs() <= 5e-5);
            assert!((original.lon() - reparsed.lon()).abs() <= 5e-5);
        }
    }
}
