use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Coordinates, WeatherReading, error::WeatherError};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Turns coordinates into a weather reading.
///
/// One attempt per call, no cache.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherReading, WeatherError>;
}
