use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoordinatesError;

/// A validated latitude/longitude pair.
///
/// Not `Copy`: produced once by the location resolver and moved into the
/// weather fetcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::Longitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Weather condition groups as named by the OpenWeather API (`weather[].main`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCode {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Clear,
    Clouds,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
    /// Anything the API sends that is not listed above.
    Unknown,
}

impl ConditionCode {
    /// Total parse of an API condition name; unrecognized names become `Unknown`.
    pub fn from_api(value: &str) -> Self {
        match value {
            "Thunderstorm" => Self::Thunderstorm,
            "Drizzle" => Self::Drizzle,
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Mist" => Self::Mist,
            "Smoke" => Self::Smoke,
            "Haze" => Self::Haze,
            "Dust" => Self::Dust,
            "Fog" => Self::Fog,
            "Sand" => Self::Sand,
            "Ash" => Self::Ash,
            "Squall" => Self::Squall,
            "Tornado" => Self::Tornado,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Mist => "Mist",
            Self::Smoke => "Smoke",
            Self::Haze => "Haze",
            Self::Dust => "Dust",
            Self::Fog => "Fog",
            Self::Sand => "Sand",
            Self::Ash => "Ash",
            Self::Squall => "Squall",
            Self::Tornado => "Tornado",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn all() -> &'static [ConditionCode] {
        &[
            Self::Thunderstorm,
            Self::Drizzle,
            Self::Rain,
            Self::Snow,
            Self::Clear,
            Self::Clouds,
            Self::Mist,
            Self::Smoke,
            Self::Haze,
            Self::Dust,
            Self::Fog,
            Self::Sand,
            Self::Ash,
            Self::Squall,
            Self::Tornado,
            Self::Unknown,
        ]
    }
}

impl std::fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful weather fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    pub condition: ConditionCode,
    pub location_name: Option<String>,
    pub observed_at: DateTime<Utc>,
}
