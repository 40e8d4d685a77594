use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::model::{Coordinates, CurrentConditions, ForecastSample, LocationQuery,
    MeasurementSystem, WeatherKind};

use super::{FetchError, FetchResult, WeatherClient};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// [`WeatherClient`] backed by the OpenWeatherMap geocoding, current-weather
/// and 5-day forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host, used to test against a stub
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a free-text city name to coordinates. The first candidate
    /// wins; an empty candidate list means the city does not exist.
    async fn geocode(&self, city: &str) -> Result<Coordinates, FetchError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| {
                tracing::debug!("Geocoding request failed: {err}");
                FetchError::Transient
            })?;

        let candidates: Vec<GeoCandidate> = read_json(res, "geocoding").await?;

        candidates
            .first()
            .map(|c| Coordinates { latitude: c.lat, longitude: c.lon })
            .ok_or(FetchError::NotFound)
    }

    async fn fetch_current(
        &self,
        position: Coordinates,
        system: MeasurementSystem,
    ) -> Result<CurrentConditions, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", position.latitude.to_string().as_str()),
                ("lon", position.longitude.to_string().as_str()),
                ("appid", self.api_key.as_str()),
                ("units", system.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                tracing::debug!("Current-conditions request failed: {err}");
                FetchError::Transient
            })?;

        let parsed: OwCurrentResponse = read_json(res, "current conditions").await?;

        let (kind, description) = primary_weather(&parsed.weather);

        Ok(CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country,
            observed_at: unix_to_utc(parsed.dt),
            temp: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed: parsed.wind.speed,
            visibility_m: parsed.visibility,
            kind,
            description,
            sunrise: unix_to_utc(parsed.sys.sunrise),
            sunset: unix_to_utc(parsed.sys.sunset),
        })
    }

    async fn fetch_forecast(
        &self,
        position: Coordinates,
        system: MeasurementSystem,
    ) -> Result<Vec<ForecastSample>, FetchError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", position.latitude.to_string().as_str()),
                ("lon", position.longitude.to_string().as_str()),
                ("appid", self.api_key.as_str()),
                ("units", system.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                tracing::debug!("Forecast request failed: {err}");
                FetchError::Transient
            })?;

        let parsed: OwForecastResponse = read_json(res, "forecast").await?;

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| {
                let (kind, description) = primary_weather(&entry.weather);
                ForecastSample {
                    at: unix_to_utc(entry.dt),
                    temp: entry.main.temp,
                    kind,
                    description,
                }
            })
            .collect())
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn resolve_and_fetch(
        &self,
        query: &LocationQuery,
        system: MeasurementSystem,
    ) -> FetchResult {
        let position = match query {
            LocationQuery::City(city) => self.geocode(city).await?,
            LocationQuery::Position(position) => *position,
        };

        // Both fetches depend on the coordinates but not on each other.
        let (current, forecast) = tokio::try_join!(
            self.fetch_current(position, system),
            self.fetch_forecast(position, system),
        )?;

        Ok((current, forecast))
    }
}

/// Map an HTTP status or body-decoding failure to a [`FetchError`] kind.
async fn read_json<T: serde::de::DeserializeOwned>(
    res: reqwest::Response,
    what: &str,
) -> Result<T, FetchError> {
    let status = res.status();
    if !status.is_success() {
        tracing::debug!("OpenWeather {what} request failed with status {status}");
        return Err(match status {
            StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
            StatusCode::NOT_FOUND => FetchError::NotFound,
            s if s.is_server_error() => FetchError::Transient,
            _ => FetchError::Unknown,
        });
    }

    res.json().await.map_err(|err| {
        tracing::debug!("Failed to parse OpenWeather {what} JSON: {err}");
        FetchError::Unknown
    })
}

fn primary_weather(weather: &[OwWeather]) -> (WeatherKind, String) {
    weather
        .first()
        .map(|w| (WeatherKind::from_api(&w.main), w.description.clone()))
        .unwrap_or((WeatherKind::Other, "Unknown".to_string()))
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    #[serde(default)]
    visibility: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body() -> serde_json::Value {
        json!({
            "name": "Paris",
            "dt": 1722945600,
            "main": {
                "temp": 21.6,
                "feels_like": 21.1,
                "temp_min": 18.2,
                "temp_max": 24.9,
                "humidity": 60,
                "pressure": 1013
            },
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "wind": {"speed": 3.4},
            "sys": {"country": "FR", "sunrise": 1722918000, "sunset": 1722970800},
            "visibility": 10000
        })
    }

    fn forecast_body() -> serde_json::Value {
        let list: Vec<_> = (0..40)
            .map(|i| {
                json!({
                    "dt": 1722945600 + i * 10800,
                    "main": {"temp": 20.0 + i as f64},
                    "weather": [{"main": "Clouds", "description": "scattered clouds"}]
                })
            })
            .collect();
        json!({"list": list})
    }

    async fn mount_data_endpoints(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn city_query_geocodes_then_fetches_both() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Paris"))
            .and(query_param("limit", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"lat": 48.85, "lon": 2.35}])),
            )
            .mount(&server)
            .await;
        mount_data_endpoints(&server).await;

        let client = OpenWeatherClient::new("KEY".into()).with_base_url(server.uri());
        let (current, forecast) = client
            .resolve_and_fetch(&LocationQuery::City("Paris".into()), MeasurementSystem::Metric)
            .await
            .expect("lookup should succeed");

        assert_eq!(current.city, "Paris");
        assert_eq!(current.country, "FR");
        assert_eq!(current.kind, WeatherKind::Clear);
        assert_eq!(current.temp, 21.6);
        assert_eq!(current.humidity_pct, 60);
        assert_eq!(forecast.len(), 40);
        assert_eq!(forecast[0].kind, WeatherKind::Clouds);
    }

    #[tokio::test]
    async fn coordinate_query_skips_geocoding() {
        let server = MockServer::start().await;
        mount_data_endpoints(&server).await;

        let client = OpenWeatherClient::new("KEY".into()).with_base_url(server.uri());
        let query = LocationQuery::Position(Coordinates { latitude: 48.85, longitude: 2.35 });
        let result = client.resolve_and_fetch(&query, MeasurementSystem::Metric).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY".into()).with_base_url(server.uri());
        let err = client
            .resolve_and_fetch(&LocationQuery::City("Atlantis".into()), MeasurementSystem::Metric)
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::NotFound);
    }

    #[tokio::test]
    async fn rejected_credential_is_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"cod": 401})))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("BAD".into()).with_base_url(server.uri());
        let err = client
            .resolve_and_fetch(&LocationQuery::City("Paris".into()), MeasurementSystem::Metric)
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Unauthorized);
    }

    #[tokio::test]
    async fn server_failure_is_transient_and_fails_the_whole_lookup() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY".into()).with_base_url(server.uri());
        let query = LocationQuery::Position(Coordinates { latitude: 0.0, longitude: 0.0 });
        let err = client.resolve_and_fetch(&query, MeasurementSystem::Metric).await.unwrap_err();

        assert_eq!(err, FetchError::Transient);
    }

    #[tokio::test]
    async fn requested_units_are_passed_through() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("KEY".into()).with_base_url(server.uri());
        let query = LocationQuery::Position(Coordinates { latitude: 0.0, longitude: 0.0 });
        let result = client.resolve_and_fetch(&query, MeasurementSystem::Imperial).await;

        assert!(result.is_ok());
    }
}
