use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::ClientConfig,
    error::WeatherError,
    model::{ConditionCode, Coordinates, WeatherReading},
};

use super::WeatherFetcher;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const UNITS: &str = "metric";

/// Client for the OpenWeather "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: ClientConfig,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), CURRENT_WEATHER_PATH)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    name: Option<String>,
    dt: Option<i64>,
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherReading, WeatherError> {
        let lat = coords.latitude().to_string();
        let lon = coords.longitude().to_string();

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("APPID", self.config.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to send request to OpenWeather");
                WeatherError::NetworkFailure
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            tracing::error!(error = %err, "failed to read OpenWeather response body");
            WeatherError::NetworkFailure
        })?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(body = %truncate_body(&body), "OpenWeather rejected the API key");
            return Err(WeatherError::Unauthorized);
        }

        if status.is_server_error() {
            tracing::error!(%status, body = %truncate_body(&body), "OpenWeather is unavailable");
            return Err(WeatherError::NetworkFailure);
        }

        parse_current(&body)
    }
}

/// Map a response body to a reading. `main.temp` and a non-empty `weather`
/// are required; anything else is a malformed response.
/// A body that is not JSON at all is malformed too, not a network failure.
fn parse_current(body: &str) -> Result<WeatherReading, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|err| {
        tracing::warn!(error = %err, body = %truncate_body(body), "weather data not found");
        WeatherError::MalformedResponse
    })?;

    // By API contract the first entry is the dominant condition.
    let primary = parsed.weather.first().ok_or_else(|| {
        tracing::warn!(body = %truncate_body(body), "weather list is empty");
        WeatherError::MalformedResponse
    })?;

    let condition = ConditionCode::from_api(&primary.main);
    if condition == ConditionCode::Unknown {
        tracing::warn!(code = %primary.main, "unrecognized weather condition");
    }

    let observed_at = parsed.dt.and_then(unix_to_utc).unwrap_or_else(Utc::now);
    let location_name = parsed.name.filter(|name| !name.is_empty());

    Ok(WeatherReading {
        temperature_celsius: parsed.main.temp,
        condition,
        location_name,
        observed_at,
    })
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
