use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{SearchKind, ValidationError};

/// Measurement convention requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    /// Parse an optional `units` query parameter; absent or empty means metric.
    pub fn from_param(value: Option<&str>) -> Result<Self, ValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(UnitSystem::default()),
            Some(s) => s.parse(),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(ValidationError::UnknownUnits(value.to_string())),
        }
    }
}

impl TryFrom<String> for UnitSystem {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.lat, raw.lon)
    }
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            lat: check_range("lat", lat, 90)?,
            lon: check_range("lon", lon, 180)?,
        })
    }

    /// Build coordinates from raw query-string values.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self, ValidationError> {
        let lat = parse_number("lat", lat)?;
        let lon = parse_number("lon", lon)?;
        Self::new(lat, lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

fn parse_number(name: &'static str, value: Option<&str>) -> Result<f64, ValidationError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(name))?;

    value
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber(name))
}

fn check_range(name: &'static str, value: f64, limit: i16) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(name));
    }
    if value.abs() > f64::from(limit) {
        return Err(ValidationError::OutOfRange {
            name,
            min: -limit,
            max: limit,
        });
    }
    Ok(value)
}

/// Where to look up weather: exactly one of a city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coords(Coordinates),
}

impl LocationQuery {
    /// Accepts any city name that is not blank. The name is kept as given.
    pub fn city(name: &str) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::Missing("city"));
        }
        Ok(LocationQuery::City(name.to_string()))
    }

    pub fn coords(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        Coordinates::new(lat, lon).map(LocationQuery::Coords)
    }

    pub fn kind(&self) -> SearchKind {
        match self {
            LocationQuery::City(_) => SearchKind::City,
            LocationQuery::Coords(_) => SearchKind::Coords,
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::City(name) => f.write_str(name),
            LocationQuery::Coords(coords) => coords.fmt(f),
        }
    }
}

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherDescriptor {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Read-only view of the provider's current weather payload.
///
/// The proxy relays the payload untouched; only the client decodes it, and
/// unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    pub name: String,
    pub weather: Vec<WeatherDescriptor>,
    pub main: MainMetrics,
    pub wind: Wind,
    /// Metres.
    pub visibility: Option<f64>,
    pub sys: SunTimes,
}

impl CurrentWeather {
    pub fn condition(&self) -> Option<&WeatherDescriptor> {
        self.weather.first()
    }
}

/// A single 3-hour forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: String,
    #[serde(default)]
    pub main: MainMetrics,
    #[serde(default)]
    pub weather: Vec<WeatherDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

/// The sample picked to stand for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub dt_txt: String,
    pub main: MainMetrics,
    pub weather: Vec<WeatherDescriptor>,
}

impl From<&ForecastSample> for DailySummary {
    fn from(sample: &ForecastSample) -> Self {
        Self {
            dt_txt: sample.dt_txt.clone(),
            main: sample.main.clone(),
            weather: sample.weather.clone(),
        }
    }
}

impl DailySummary {
    pub fn condition(&self) -> Option<&WeatherDescriptor> {
        self.weather.first()
    }
}
