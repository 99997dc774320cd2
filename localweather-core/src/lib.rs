//! Core library for the `localweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location resolution behind a service trait
//! - The OpenWeather client behind a fetcher trait
//! - The location-then-weather pipeline and its `FetchState`
//! - The static condition presentation table
//!
//! It is used by `localweather-cli`, but can also drive other front ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod pipeline;
pub mod presentation;
pub mod provider;
pub mod state;

pub use config::{ClientConfig, Config, LocationConfig};
pub use error::{CoordinatesError, ErrorReason, FAILURE_HINT, LocationError, WeatherError};
pub use location::{
    FixedLocation, IpLocationService, LocationResolver, LocationService, PermissionStatus,
    Position,
};
pub use model::{ConditionCode, Coordinates, WeatherReading};
pub use pipeline::WeatherPipeline;
pub use presentation::{ColorValue, ConditionPresentation, IconId, presentation_for};
pub use provider::{OpenWeatherClient, WeatherFetcher};
pub use state::FetchState;
