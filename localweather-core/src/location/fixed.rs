use async_trait::async_trait;

use super::{LocationService, PermissionStatus, Position};

/// A position the user typed in. Permission is implied.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    position: Position,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { position: Position { latitude, longitude } }
    }
}

#[async_trait]
impl LocationService for FixedLocation {
    async fn request_foreground_permission(&self) -> anyhow::Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> anyhow::Result<Position> {
        Ok(self.position)
    }
}
