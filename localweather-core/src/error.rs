use serde::Serialize;
use thiserror::Error;

/// Shown under every failure message, whatever stage failed.
pub const FAILURE_HINT: &str = "Please check your internet connection or location settings.";

/// Failures of the location stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    #[error("Permission to access location was denied")]
    PermissionDenied,

    #[error("Error getting location")]
    Unavailable,
}

/// Failures of the weather stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherError {
    #[error("Error fetching weather")]
    NetworkFailure,

    #[error("Could not fetch weather data")]
    MalformedResponse,

    #[error("The weather service rejected the API key")]
    Unauthorized,
}

/// Why a pipeline run ended in the failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl ErrorReason {
    /// Non-technical message for display.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn hint(&self) -> &'static str {
        FAILURE_HINT
    }

    pub fn is_location(&self) -> bool {
        matches!(self, Self::Location(_))
    }
}

/// Rejected latitude/longitude values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinatesError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}
