use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{Coordinates, CurrentConditions, ForecastSample, LocationQuery,
    MeasurementSystem};

pub mod openweather;

/// Why a lookup failed, with the static message shown to the user.
///
/// The core never retries and never inspects these beyond message selection;
/// every kind is terminal for the current lookup and the user may retry
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City not found. Please try again.")]
    NotFound,
    #[error("Invalid API key. Please check your API key and make sure it is activated.")]
    Unauthorized,
    #[error("Error fetching weather data. Please try again.")]
    Transient,
    #[error("Error fetching weather data. Please try again.")]
    Unknown,
    #[error("Geolocation is not supported by this environment.")]
    GeolocationUnavailable,
    #[error("Unable to get your location. Please enter a city name.")]
    GeolocationDenied,
}

/// A current-conditions snapshot together with its forecast feed, fetched in
/// one lookup and therefore unit-consistent with each other.
pub type FetchResult = Result<(CurrentConditions, Vec<ForecastSample>), FetchError>;

/// Boundary to the weather data provider.
///
/// For a city query, resolution to coordinates strictly precedes the data
/// fetches; once coordinates are known, the current-conditions and forecast
/// requests run concurrently and both must succeed.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn resolve_and_fetch(
        &self,
        query: &LocationQuery,
        system: MeasurementSystem,
    ) -> FetchResult;
}

/// Boundary to the host's geolocation capability: a single-shot request
/// resolving to exactly one position or one failure.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, FetchError>;
}

/// [`Geolocator`] for hosts without a location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, FetchError> {
        Err(FetchError::GeolocationUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_static_and_distinct_where_it_matters() {
        assert!(FetchError::NotFound.to_string().contains("not found"));
        assert!(FetchError::Unauthorized.to_string().contains("API key"));
        // Transient and Unknown intentionally share the generic retry message.
        assert_eq!(FetchError::Transient.to_string(), FetchError::Unknown.to_string());
        assert!(FetchError::GeolocationDenied.to_string().contains("your location"));
    }

    #[tokio::test]
    async fn no_geolocation_reports_unavailable() {
        let err = NoGeolocation.current_position().await.unwrap_err();
        assert_eq!(err, FetchError::GeolocationUnavailable);
    }
}
