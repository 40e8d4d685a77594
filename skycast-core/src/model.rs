use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measurement system selected for a session. Affects the units requested
/// from the weather API and the labels used when formatting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    #[default]
    Metric,
    Imperial,
}

impl MeasurementSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "metric",
            MeasurementSystem::Imperial => "imperial",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            MeasurementSystem::Metric => MeasurementSystem::Imperial,
            MeasurementSystem::Imperial => MeasurementSystem::Metric,
        }
    }
}

impl std::fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MeasurementSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(MeasurementSystem::Metric),
            "imperial" => Ok(MeasurementSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown measurement system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the user asked to look up: a free-text city name or coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Position(Coordinates),
}

/// Primary weather category, reduced from the provider's `main` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherKind {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Other,
}

impl WeatherKind {
    /// Map OpenWeather's `weather[0].main` string to a category.
    pub fn from_api(main: &str) -> Self {
        match main {
            "Clear" => WeatherKind::Clear,
            "Clouds" => WeatherKind::Clouds,
            "Rain" => WeatherKind::Rain,
            "Thunderstorm" => WeatherKind::Thunderstorm,
            "Snow" => WeatherKind::Snow,
            _ => WeatherKind::Other,
        }
    }

    /// A small glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherKind::Clear => "☀",
            WeatherKind::Clouds => "☁",
            WeatherKind::Rain => "🌧",
            WeatherKind::Thunderstorm => "⛈",
            WeatherKind::Snow => "❄",
            WeatherKind::Other => "☁",
        }
    }
}

/// An immutable snapshot of current conditions, replaced wholesale on each
/// successful fetch. Raw values stay in the measurement system that was
/// active when they were fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub observed_at: DateTime<Utc>,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed: f64,
    pub visibility_m: f64,
    pub kind: WeatherKind,
    pub description: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One entry of the 3-hourly forecast feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub at: DateTime<Utc>,
    pub temp: f64,
    pub kind: WeatherKind,
    pub description: String,
}

/// A favorited city with the conditions last seen for it.
/// Identity is the (name, country) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub name: String,
    pub country: String,
    pub temp: f64,
    pub description: String,
}

impl FavoriteCity {
    pub fn from_current(current: &CurrentConditions) -> Self {
        Self {
            name: current.city.clone(),
            country: current.country.clone(),
            temp: current.temp,
            description: current.description.clone(),
        }
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.country)
    }
}
