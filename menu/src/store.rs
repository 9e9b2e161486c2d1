//! # Local Menu Store
//!
//! Holds the last successfully synchronized menu snapshot and answers
//! filtered, sorted queries against it.
//!
//! The snapshot lives in one JSON file. A replace writes the whole new
//! snapshot to a sibling temp file and renames it over the old one, then
//! swaps the in-memory copy under the write lock. Readers therefore see
//! either the complete old set or the complete new set, never a mix, and a
//! failed commit leaves the previous snapshot in place on disk and in
//! memory.

use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::RwLock,
};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::{error::PersistenceError, model::Dish, utils::fold};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    dishes: Vec<Dish>,
    #[serde(default)]
    synced_at: Option<DateTime<Utc>>,
}

pub struct MenuStore {
    path: PathBuf,
    snapshot: RwLock<Snapshot>,
    revision: watch::Sender<u64>,
}

impl MenuStore {
    /// Opens the store at `path`, loading the last committed snapshot.
    /// A missing file is an empty store, an unreadable one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let snapshot: Snapshot = read_snapshot(&path)?.unwrap_or_default();

        debug!("opened menu store with {} dishes", snapshot.dishes.len());

        let (revision, _) = watch::channel(0);
        Ok(Self {
            path,
            snapshot: RwLock::new(snapshot),
            revision,
        })
    }

    /// Atomically discards the current snapshot and installs `dishes`.
    /// Duplicate ids keep their first occurrence. On failure the visible
    /// contents, in memory and on disk, are unchanged.
    pub fn replace_all(&self, dishes: Vec<Dish>) -> Result<(), PersistenceError> {
        let mut seen = HashSet::new();
        let dishes: Vec<Dish> = dishes
            .into_iter()
            .filter(|dish| seen.insert(dish.id))
            .collect();

        let next = Snapshot {
            dishes,
            synced_at: Some(Utc::now()),
        };
        commit(&self.path, &next)?;

        *self.snapshot.write().expect("snapshot lock poisoned") = next;
        self.revision.send_modify(|rev| *rev += 1);

        Ok(())
    }

    /// Dishes whose title contains `filter` (case- and accent-insensitive,
    /// empty matches all), optionally narrowed to an exact category, ordered
    /// ascending by folded title. Ties keep snapshot order.
    pub fn query(&self, filter: &str, category: Option<&str>) -> Vec<Dish> {
        let needle = fold(filter);
        let snapshot = self.snapshot.read().expect("snapshot lock poisoned");

        let mut dishes: Vec<Dish> = snapshot
            .dishes
            .iter()
            .filter(|dish| needle.is_empty() || fold(&dish.title).contains(&needle))
            .filter(|dish| category.is_none_or(|c| dish.category.as_deref() == Some(c)))
            .cloned()
            .collect();

        dishes.sort_by_cached_key(|dish| fold(&dish.title));
        dishes
    }

    pub fn get(&self, id: u32) -> Option<Dish> {
        let snapshot = self.snapshot.read().expect("snapshot lock poisoned");

        snapshot.dishes.iter().find(|dish| dish.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot
            .read()
            .expect("snapshot lock poisoned")
            .dishes
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot
            .read()
            .expect("snapshot lock poisoned")
            .synced_at
    }

    /// Revision channel, bumped after every committed replace. Listeners
    /// re-query on change instead of observing the store implicitly.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

pub(crate) fn read_snapshot<T: DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, PersistenceError> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupted {
                path: path.to_path_buf(),
                source,
            }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistenceError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Commits `value` to `path` through a temp-file rename, so the file on
/// disk always holds one complete snapshot.
pub(crate) fn commit<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec(value).map_err(PersistenceError::Encode)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(|source| PersistenceError::Commit {
        path: tmp.clone(),
        source,
    })?;

    fs::rename(&tmp, path).map_err(|source| PersistenceError::Commit {
        path: path.to_path_buf(),
        source,
    })
}
