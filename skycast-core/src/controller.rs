//! Orchestration of user intent against the client, transforms and
//! favorites store, producing the view-state consumed by rendering.

use crate::client::{FetchError, FetchResult, Geolocator, WeatherClient};
use crate::favorites::{self, FavoritesStore, Storage};
use crate::model::{CurrentConditions, FavoriteCity, ForecastSample, LocationQuery,
    MeasurementSystem};

/// The data shown while a lookup is [`Phase::Loaded`]. Replaced wholesale on
/// every successful fetch; current and forecast always come from the same
/// lookup and therefore share one measurement system.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastSample>,
}

/// Lookup lifecycle. A new search or geolocate request always passes through
/// `Loading`; a failed refresh discards prior data rather than presenting it
/// as current.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded(Snapshot),
    Failed(FetchError),
}

/// Handle for one lookup, valid until a newer lookup begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupId(u64);

/// Single-threaded dashboard state: one in-flight lookup at a time, with a
/// generation counter so a stale response arriving after a newer request has
/// started can never overwrite newer state.
#[derive(Debug)]
pub struct Dashboard<C, S> {
    client: C,
    store: FavoritesStore<S>,
    phase: Phase,
    system: MeasurementSystem,
    last_query: Option<LocationQuery>,
    favorites: Vec<FavoriteCity>,
    generation: u64,
}

impl<C: WeatherClient, S: Storage> Dashboard<C, S> {
    /// Build a dashboard, loading persisted favorites once at startup.
    pub fn new(client: C, store: FavoritesStore<S>, system: MeasurementSystem) -> Self {
        let favorites = store.load();
        Self {
            client,
            store,
            phase: Phase::Idle,
            system,
            last_query: None,
            favorites,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.phase {
            Phase::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn system(&self) -> MeasurementSystem {
        self.system
    }

    pub fn favorites(&self) -> &[FavoriteCity] {
        &self.favorites
    }

    /// Start a lookup: supersedes any in-flight one, remembers the query for
    /// implicit re-fetches and moves to `Loading`.
    pub fn begin_lookup(&mut self, query: LocationQuery) -> LookupId {
        self.generation += 1;
        self.last_query = Some(query);
        self.phase = Phase::Loading;
        LookupId(self.generation)
    }

    /// Apply the outcome of a lookup. Results of superseded lookups are
    /// discarded; returns whether the result was applied.
    pub fn finish_lookup(&mut self, lookup: LookupId, result: FetchResult) -> bool {
        if lookup.0 != self.generation {
            tracing::debug!("Discarding result of superseded lookup");
            return false;
        }

        self.phase = match result {
            Ok((current, forecast)) => Phase::Loaded(Snapshot { current, forecast }),
            Err(err) => Phase::Failed(err),
        };
        true
    }

    /// Look up an explicit query: begin, fetch, apply.
    pub async fn lookup(&mut self, query: LocationQuery) {
        let lookup = self.begin_lookup(query.clone());
        let result = self.client.resolve_and_fetch(&query, self.system).await;
        self.finish_lookup(lookup, result);
    }

    /// Look up a city by name.
    pub async fn search(&mut self, city: &str) {
        self.lookup(LocationQuery::City(city.to_string())).await;
    }

    /// Acquire the host position, then look it up like a coordinate query.
    pub async fn geolocate<G: Geolocator>(&mut self, geolocator: &G) {
        self.generation += 1;
        self.phase = Phase::Loading;

        match geolocator.current_position().await {
            Ok(position) => self.lookup(LocationQuery::Position(position)).await,
            Err(err) => self.phase = Phase::Failed(err),
        }
    }

    /// Switch between metric and imperial. Raw values are never converted
    /// locally; when data is on screen this re-runs the last-used query so
    /// the snapshot stays unit-consistent.
    pub async fn toggle_units(&mut self) {
        self.system = self.system.toggled();

        if matches!(self.phase, Phase::Loaded(_))
            && let Some(query) = self.last_query.clone()
        {
            self.lookup(query).await;
        }
    }

    /// Add or remove the on-screen city from the favorites, writing the
    /// updated list through to storage. No-op unless a snapshot is loaded;
    /// never changes the phase.
    pub fn toggle_favorite(&mut self) {
        let Phase::Loaded(snapshot) = &self.phase else {
            return;
        };

        self.favorites = favorites::toggle(&snapshot.current, &self.favorites);
        self.store.persist(&self.favorites);
    }

    /// Re-fetch a favorited city. Searches by name only, so a name shared
    /// across countries may resolve to the geocoder's first match rather
    /// than the favorited one.
    pub async fn open_favorite(&mut self, index: usize) {
        let Some(favorite) = self.favorites.get(index) else {
            return;
        };

        let name = favorite.name.clone();
        self.search(&name).await;
    }
}
