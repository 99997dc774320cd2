use serde::Serialize;

use crate::{error::ErrorReason, model::WeatherReading};

/// Progress of one pipeline run. Starts `Loading` and settles once.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState {
    #[default]
    Loading,
    Ready(WeatherReading),
    Failed { reason: ErrorReason },
}

impl FetchState {
    /// Move out of `Loading`. Returns `false`, leaving the state untouched,
    /// if it has already settled.
    pub fn settle(&mut self, outcome: Result<WeatherReading, ErrorReason>) -> bool {
        if !self.is_loading() {
            return false;
        }

        *self = match outcome {
            Ok(reading) => Self::Ready(reading),
            Err(reason) => Self::Failed { reason },
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            Self::Ready(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<ErrorReason> {
        match self {
            Self::Failed { reason } => Some(*reason),
            _ => None,
        }
    }
}
