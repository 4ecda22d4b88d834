use std::sync::Arc;
use thiserror::Error;
use weather_core::{
    LocationQuery, UnitSystem, ValidationError, WeatherProvider, provider::Dataset,
};

/// The four relay operations, one per location mode and dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CurrentByCity,
    CurrentByCoords,
    ForecastByCity,
    ForecastByCoords,
}

impl Operation {
    fn dataset(&self) -> Dataset {
        match self {
            Operation::CurrentByCity | Operation::CurrentByCoords => Dataset::Current,
            Operation::ForecastByCity | Operation::ForecastByCoords => Dataset::Forecast,
        }
    }

    /// Message returned to callers when the upstream call fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::CurrentByCity => "Failed to fetch weather data",
            Operation::CurrentByCoords => "Failed to fetch weather by coordinates",
            Operation::ForecastByCity => "Failed to fetch forecast data",
            Operation::ForecastByCoords => "Failed to fetch forecast for coordinates",
        }
    }

    fn log_label(&self) -> &'static str {
        match self {
            Operation::CurrentByCity => "Error fetching weather",
            Operation::CurrentByCoords => "Error fetching weather by coords",
            Operation::ForecastByCity => "Error fetching forecast",
            Operation::ForecastByCoords => "Error fetching forecast by coords",
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Carries no upstream detail; that only goes to the log.
    #[error("{}", .0.failure_message())]
    Upstream(Operation),
}

/// Stateless relay to the upstream provider.
#[derive(Debug, Clone)]
pub struct ProxyService {
    provider: Arc<dyn WeatherProvider>,
}

impl ProxyService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn current_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<String, ServiceError> {
        let location = LocationQuery::city(city)?;
        self.relay(Operation::CurrentByCity, &location, units).await
    }

    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
    ) -> Result<String, ServiceError> {
        let location = LocationQuery::coords(lat, lon)?;
        self.relay(Operation::CurrentByCoords, &location, units).await
    }

    pub async fn forecast_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<String, ServiceError> {
        let location = LocationQuery::city(city)?;
        self.relay(Operation::ForecastByCity, &location, units).await
    }

    pub async fn forecast_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
    ) -> Result<String, ServiceError> {
        let location = LocationQuery::coords(lat, lon)?;
        self.relay(Operation::ForecastByCoords, &location, units).await
    }

    async fn relay(
        &self,
        op: Operation,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<String, ServiceError> {
        let result = match op.dataset() {
            Dataset::Current => self.provider.current(location, units).await,
            Dataset::Forecast => self.provider.forecast(location, units).await,
        };

        result.map_err(|err| {
            log::error!("{}: {err}", op.log_label());
            ServiceError::Upstream(op)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use weather_core::ProviderError;

    /// Records every call and answers with a canned result.
    #[derive(Debug, Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<(Dataset, LocationQuery, UnitSystem)>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn answer(
            &self,
            dataset: Dataset,
            location: &LocationQuery,
            units: UnitSystem,
        ) -> Result<String, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push((dataset, location.clone(), units));

            if self.fail {
                Err(ProviderError::Status {
                    dataset,
                    status: reqwest::StatusCode::UNAUTHORIZED,
                    body: "Invalid API key".into(),
                })
            } else {
                Ok(format!(r#"{{"source":"{dataset}"}}"#))
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current(
            &self,
            location: &LocationQuery,
            units: UnitSystem,
        ) -> Result<String, ProviderError> {
            self.answer(Dataset::Current, location, units)
        }

        async fn forecast(
            &self,
            location: &LocationQuery,
            units: UnitSystem,
        ) -> Result<String, ProviderError> {
            self.answer(Dataset::Forecast, location, units)
        }
    }

    fn service(provider: &Arc<RecordingProvider>) -> ProxyService {
        ProxyService::new(provider.clone())
    }

    #[tokio::test]
    async fn current_by_city_makes_exactly_one_call() {
        let provider = Arc::new(RecordingProvider::default());
        let body = service(&provider)
            .current_by_city("Kraków", UnitSystem::Imperial)
            .await
            .unwrap();

        assert_eq!(body, r#"{"source":"current weather"}"#);
        let calls = provider.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(
                Dataset::Current,
                LocationQuery::City("Kraków".into()),
                UnitSystem::Imperial
            )]
        );
    }

    #[tokio::test]
    async fn forecast_by_coords_dispatches_to_forecast() {
        let provider = Arc::new(RecordingProvider::default());
        service(&provider)
            .forecast_by_coords(-33.87, 151.21, UnitSystem::Metric)
            .await
            .unwrap();

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Dataset::Forecast);
        assert!(matches!(calls[0].1, LocationQuery::Coords(_)));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_provider() {
        let provider = Arc::new(RecordingProvider::default());
        let svc = service(&provider);

        let err = svc.forecast_by_city("", UnitSystem::Metric).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ValidationError::Missing("city"))));

        let err = svc
            .current_by_coords(120.0, 0.0, UnitSystem::Metric)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));

        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_replaced_by_generic_message() {
        let provider = Arc::new(RecordingProvider {
            fail: true,
            ..Default::default()
        });

        let err = service(&provider)
            .current_by_coords(1.0, 2.0, UnitSystem::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Upstream(Operation::CurrentByCoords)));
        assert_eq!(err.to_string(), "Failed to fetch weather by coordinates");
        assert!(!err.to_string().contains("Invalid API key"));
    }
}
