use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{LocationService, PermissionStatus, Position};

pub const DEFAULT_BASE_URL: &str = "http://ip-api.com";

/// Approximate position from the public IP address.
///
/// The "permission" is the user's consent to contact the geolocation service.
#[derive(Debug, Clone)]
pub struct IpLocationService {
    consent: PermissionStatus,
    base_url: String,
    http: Client,
}

impl IpLocationService {
    pub fn new(consent: PermissionStatus) -> Self {
        Self::with_base_url(consent, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(consent: PermissionStatus, base_url: impl Into<String>) -> Self {
        Self {
            consent,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

fn parse_position(body: &str) -> Result<Position> {
    let parsed: IpApiResponse =
        serde_json::from_str(body).context("Failed to parse IP geolocation JSON")?;

    if parsed.status != "success" {
        return Err(anyhow!(
            "IP geolocation lookup failed: {}",
            parsed.message.as_deref().unwrap_or("no reason given")
        ));
    }

    match (parsed.lat, parsed.lon) {
        (Some(latitude), Some(longitude)) => {
            tracing::debug!(city = parsed.city.as_deref(), "IP geolocation succeeded");
            Ok(Position { latitude, longitude })
        }
        _ => Err(anyhow!("IP geolocation response contained no coordinates")),
    }
}

#[async_trait]
impl LocationService for IpLocationService {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus> {
        Ok(self.consent)
    }

    async fn current_position(&self) -> Result<Position> {
        let url = format!("{}/json/", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(url)
            .query(&[("fields", "status,message,lat,lon,city")])
            .send()
            .await
            .context("Failed to send request to IP geolocation service")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read IP geolocation response body")?;

        if !status.is_success() {
            return Err(anyhow!("IP geolocation request failed with status {status}"));
        }

        parse_position(&body)
    }
}
