//! Data models for the weather dashboard
//!
//! - City: a named coordinate pair from the predefined city list
//! - Weather: the upstream current-weather payload
//! - Card: display composition of a place and its weather

pub mod card;
pub mod city;
pub mod weather;

pub use card::WeatherCardData;
pub use city::City;
pub use weather::{Condition, MainReadings, WeatherResponse};
