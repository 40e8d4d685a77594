//! Persisted favorites: a deduplicated list of cities keyed by
//! (name, country), written through to storage on every mutation.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{fs, path::PathBuf};

use crate::model::{CurrentConditions, FavoriteCity};

/// Key-value style backing store holding the one serialized favorites blob.
/// Implemented by a platform data file in production and by in-memory fakes
/// in tests.
pub trait Storage {
    /// Returns the stored blob, or `None` if nothing was written yet.
    fn read(&self) -> Option<String>;

    fn write(&self, contents: &str) -> Result<()>;
}

/// Compute the toggled favorites list for `current`.
///
/// Removes the entry whose key matches `current` if present, inserts a fresh
/// snapshot of `current` otherwise. Always returns a new list; the caller's
/// list is left untouched. Applying this twice with the same snapshot yields
/// a list with the original key set.
pub fn toggle(current: &CurrentConditions, favorites: &[FavoriteCity]) -> Vec<FavoriteCity> {
    let key = (current.city.as_str(), current.country.as_str());

    if favorites.iter().any(|fav| fav.key() == key) {
        favorites.iter().filter(|fav| fav.key() != key).cloned().collect()
    } else {
        let mut updated = favorites.to_vec();
        updated.push(FavoriteCity::from_current(current));
        updated
    }
}

/// Loads and persists the favorites list through a [`Storage`] backend.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: Storage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the persisted favorites. Missing or malformed data means an
    /// empty list; persisted state is never an error for the caller.
    pub fn load(&self) -> Vec<FavoriteCity> {
        let Some(contents) = self.storage.read() else {
            return Vec::new();
        };

        match serde_json::from_str(&contents) {
            Ok(favorites) => favorites,
            Err(err) => {
                tracing::warn!("Discarding malformed favorites data: {err}");
                Vec::new()
            }
        }
    }

    /// Overwrite storage with the full list. Fire-and-forget: failures are
    /// logged, not surfaced, since the in-memory list stays authoritative
    /// for the session.
    pub fn persist(&self, favorites: &[FavoriteCity]) {
        let contents = match serde_json::to_string(favorites) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!("Failed to serialize favorites: {err}");
                return;
            }
        };

        if let Err(err) = self.storage.write(&contents) {
            tracing::warn!("Failed to persist favorites: {err}");
        }
    }
}

/// File-backed [`Storage`] under the platform data directory.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new() -> Result<Self> {
        Ok(Self { path: Self::default_path()? })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("favorites.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write favorites file: {}", self.path.display()))
    }
}
