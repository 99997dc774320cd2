use crate::{
    error::ErrorReason,
    location::LocationResolver,
    model::WeatherReading,
    provider::WeatherFetcher,
    state::FetchState,
};

/// Location first, then weather. A location failure short-circuits the run
/// and the fetcher is never called.
#[derive(Debug)]
pub struct WeatherPipeline {
    resolver: LocationResolver,
    fetcher: Box<dyn WeatherFetcher>,
}

impl WeatherPipeline {
    pub fn new(resolver: LocationResolver, fetcher: Box<dyn WeatherFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Run once and return the settled state.
    pub async fn run(self) -> FetchState {
        let mut state = FetchState::default();
        self.run_into(&mut state).await;
        state
    }

    /// Run once, settling a state owned by the caller. Returns `false` when
    /// `state` had already settled.
    pub async fn run_into(self, state: &mut FetchState) -> bool {
        if !state.is_loading() {
            return false;
        }

        let outcome = self.fetch().await;
        match &outcome {
            Ok(reading) => tracing::info!(
                temperature = reading.temperature_celsius,
                condition = %reading.condition,
                "weather ready"
            ),
            Err(reason) => tracing::info!(%reason, "weather pipeline failed"),
        }
        state.settle(outcome)
    }

    async fn fetch(&self) -> Result<WeatherReading, ErrorReason> {
        let coords = self.resolver.resolve_location().await?;
        tracing::debug!("fetching weather");
        let reading = self.fetcher.fetch_weather(coords).await?;
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Coordinates,
        error::{LocationError, WeatherError},
        location::{FixedLocation, LocationService, PermissionStatus, Position},
        model::ConditionCode,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct DeniedLocation;

    #[async_trait]
    impl LocationService for DeniedLocation {
        async fn request_foreground_permission(&self) -> anyhow::Result<PermissionStatus> {
            Ok(PermissionStatus::Denied)
        }

        async fn current_position(&self) -> anyhow::Result<Position> {
            anyhow::bail!("position must not be read without permission")
        }
    }

    #[derive(Debug, Clone)]
    struct RecordingFetcher {
        outcome: Result<WeatherReading, WeatherError>,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<Coordinates>>>,
    }

    impl RecordingFetcher {
        fn new(outcome: Result<WeatherReading, WeatherError>) -> Self {
            Self {
                outcome,
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl WeatherFetcher for RecordingFetcher {
        async fn fetch_weather(
            &self,
            coords: Coordinates,
        ) -> Result<WeatherReading, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(coords);
            self.outcome.clone()
        }
    }

    fn clouds() -> WeatherReading {
        WeatherReading {
            temperature_celsius: 18.4,
            condition: ConditionCode::Clouds,
            location_name: None,
            observed_at: Utc::now(),
        }
    }

    fn pipeline(
        service: impl LocationService + 'static,
        fetcher: &RecordingFetcher,
    ) -> WeatherPipeline {
        WeatherPipeline::new(
            LocationResolver::new(Box::new(service)),
            Box::new(fetcher.clone()),
        )
    }

    #[tokio::test]
    async fn success_settles_ready_with_resolved_coordinates() {
        let reading = clouds();
        let fetcher = RecordingFetcher::new(Ok(reading.clone()));

        let state = pipeline(FixedLocation::new(51.5, -0.12), &fetcher).run().await;

        assert_eq!(state, FetchState::Ready(reading));
        assert_eq!(
            *fetcher.seen.lock().unwrap(),
            vec![Coordinates::new(51.5, -0.12).unwrap()]
        );
    }

    #[tokio::test]
    async fn denied_permission_skips_fetcher() {
        let fetcher = RecordingFetcher::new(Ok(clouds()));

        let state = pipeline(DeniedLocation, &fetcher).run().await;

        assert_eq!(state.failure(), Some(LocationError::PermissionDenied.into()));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_fixed_position_skips_fetcher() {
        let fetcher = RecordingFetcher::new(Ok(clouds()));

        let state = pipeline(FixedLocation::new(0.0, 200.0), &fetcher).run().await;

        assert_eq!(state.failure(), Some(LocationError::Unavailable.into()));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_settles_failed() {
        let fetcher = RecordingFetcher::new(Err(WeatherError::MalformedResponse));

        let state = pipeline(FixedLocation::new(1.0, 2.0), &fetcher).run().await;

        assert_eq!(state.failure(), Some(WeatherError::MalformedResponse.into()));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_into_refuses_settled_state() {
        let fetcher = RecordingFetcher::new(Ok(clouds()));
        let mut state = FetchState::Failed { reason: WeatherError::NetworkFailure.into() };

        let changed = pipeline(FixedLocation::new(1.0, 2.0), &fetcher).run_into(&mut state).await;

        assert!(!changed);
        assert!(state.is_failed());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }
}
