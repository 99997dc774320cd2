use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{error::LocationError, model::Coordinates};

pub mod fixed;
pub mod ip;

pub use fixed::FixedLocation;
pub use ip::IpLocationService;

/// Answer to a foreground location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user was never asked. Treated as not granted.
    Undetermined,
}

impl PermissionStatus {
    /// Map a stored yes/no answer (absent when never asked).
    pub fn from_consent(consent: Option<bool>) -> Self {
        match consent {
            Some(true) => Self::Granted,
            Some(false) => Self::Denied,
            None => Self::Undetermined,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Raw position reported by a location service, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the device position.
///
/// Any error returned here is normalized by [`LocationResolver`]; services
/// are free to report whatever detail helps diagnostics.
#[async_trait]
pub trait LocationService: Send + Sync + Debug {
    async fn request_foreground_permission(&self) -> anyhow::Result<PermissionStatus>;

    async fn current_position(&self) -> anyhow::Result<Position>;
}

#[derive(Debug)]
pub struct LocationResolver {
    service: Box<dyn LocationService>,
}

impl LocationResolver {
    pub fn new(service: Box<dyn LocationService>) -> Self {
        Self { service }
    }

    /// Ask for permission, then read the position once.
    ///
    /// The position is never requested unless permission is granted.
    pub async fn resolve_location(&self) -> Result<Coordinates, LocationError> {
        let status = self
            .service
            .request_foreground_permission()
            .await
            .map_err(|err| {
                tracing::error!(error = %format!("{err:#}"), "location permission request failed");
                LocationError::Unavailable
            })?;

        if !status.is_granted() {
            tracing::warn!(?status, "location permission not granted");
            return Err(LocationError::PermissionDenied);
        }

        let position = self.service.current_position().await.map_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "could not read current position");
            LocationError::Unavailable
        })?;

        let coords = Coordinates::new(position.latitude, position.longitude).map_err(|err| {
            tracing::warn!(error = %err, "location service reported an invalid position");
            LocationError::Unavailable
        })?;

        tracing::debug!(
            latitude = coords.latitude(),
            longitude = coords.longitude(),
            "location resolved"
        );
        Ok(coords)
    }
}
