//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider contract and its OpenWeatherMap implementation
//! - Pure transforms (unit formatting, forecast bucketing)
//! - The persisted favorites store
//! - The dashboard controller driving the whole thing
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services.

pub mod client;
pub mod config;
pub mod controller;
pub mod favorites;
pub mod forecast;
pub mod model;
pub mod units;

pub use client::{FetchError, FetchResult, Geolocator, NoGeolocation, WeatherClient};
pub use client::openweather::OpenWeatherClient;
pub use config::Config;
pub use controller::{Dashboard, LookupId, Phase, Snapshot};
pub use favorites::{FavoritesStore, FileStorage, Storage};
pub use model::{Coordinates, CurrentConditions, FavoriteCity, ForecastSample, LocationQuery,
    MeasurementSystem, WeatherKind};
