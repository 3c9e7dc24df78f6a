//! Personal movie collections (watchlist, favorites, watched)
//!
//! Each collection is an ordered list with at most one entry per movie id. The
//! store is hydrated from storage once, and only mutations that happen after
//! hydration are written back, so a fresh store never overwrites saved lists
//! with its empty defaults.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::{CollectionKind, MovieId, MovieSummary},
    storage::{StorageBackend, StorageKey},
};

/// Where the store is in its startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, nothing read from storage yet
    Uninitialized,
    /// Collections loaded from storage; nothing written back
    Hydrated,
    /// At least one mutation has happened; writes are enabled
    Active,
}

pub struct CollectionStore {
    storage: Arc<dyn StorageBackend>,
    collections: [Vec<MovieSummary>; 3],
    lifecycle: Lifecycle,
}

impl CollectionStore {
    /// Creates an empty, unhydrated store
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            collections: Default::default(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Creates a store and hydrates it from storage
    pub fn open(storage: Arc<dyn StorageBackend>) -> Self {
        let mut store = Self::new(storage);
        store.hydrate();
        store
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Loads every collection from storage
    ///
    /// Missing or unreadable values become empty collections. Never writes.
    pub fn hydrate(&mut self) {
        for kind in CollectionKind::ALL {
            self.collections[kind.index()] = self.load(kind);
        }

        self.lifecycle = Lifecycle::Hydrated;

        tracing::info!(
            backend = self.storage.name(),
            watchlist = self.collections[CollectionKind::Watchlist.index()].len(),
            favorites = self.collections[CollectionKind::Favorites.index()].len(),
            watched = self.collections[CollectionKind::Watched.index()].len(),
            "Collections hydrated"
        );
    }

    fn load(&self, kind: CollectionKind) -> Vec<MovieSummary> {
        let key = StorageKey::Collection(kind);

        let raw = match self.storage.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    collection = %kind,
                    "Failed to read collection, starting empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<MovieSummary>>(&raw) {
            Ok(movies) => dedupe_stored(movies),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    collection = %kind,
                    "Stored collection is not valid JSON, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Adds the movie if its id is absent, removes it otherwise
    ///
    /// Returns whether the movie is in the collection afterwards. The full
    /// collection is persisted after the in-memory change.
    pub fn toggle(&mut self, kind: CollectionKind, movie: MovieSummary) -> bool {
        if self.lifecycle == Lifecycle::Uninitialized {
            self.hydrate();
        }

        let movie_id = movie.id;
        let collection = &mut self.collections[kind.index()];
        let now_member = match collection.iter().position(|m| m.id == movie_id) {
            Some(index) => {
                collection.remove(index);
                false
            }
            None => {
                collection.push(movie);
                true
            }
        };

        self.lifecycle = Lifecycle::Active;
        self.persist(kind);

        tracing::debug!(collection = %kind, movie_id, added = now_member, "Collection toggled");
        now_member
    }

    fn persist(&self, kind: CollectionKind) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }

        let key = StorageKey::Collection(kind);
        let result = serde_json::to_string(self.collection(kind))
            .map_err(AppError::from)
            .and_then(|json| self.storage.write(&key, &json));

        if let Err(e) = result {
            tracing::error!(error = %e, collection = %kind, "Failed to persist collection");
        }
    }

    pub fn is_member(&self, kind: CollectionKind, id: MovieId) -> bool {
        self.collection(kind).iter().any(|m| m.id == id)
    }

    /// Read-only view of a collection in insertion order
    pub fn collection(&self, kind: CollectionKind) -> &[MovieSummary] {
        &self.collections[kind.index()]
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        self.collection(kind).len()
    }

    pub fn is_empty(&self, kind: CollectionKind) -> bool {
        self.collection(kind).is_empty()
    }
}

/// Drops repeated ids from a stored list, keeping the first entry
fn dedupe_stored(movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut seen = std::collections::HashSet::new();
    movies.into_iter().filter(|m| seen.insert(m.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use crate::storage::MemoryStorage;

    fn movie(id: MovieId) -> MovieSummary {
        MovieSummary {
            id,
            title: Some(format!("Movie {}", id)),
            poster_path: Some(format!("/{}.jpg", id)),
            ..Default::default()
        }
    }

    fn ids(store: &CollectionStore, kind: CollectionKind) -> Vec<MovieId> {
        store.collection(kind).iter().map(|m| m.id).collect()
    }

    /// Backend whose every read and write fails
    struct UnavailableStorage;

    impl StorageBackend for UnavailableStorage {
        fn read(&self, key: &StorageKey) -> AppResult<Option<String>> {
            Err(AppError::Storage(format!("{} is unreadable", key)))
        }

        fn write(&self, key: &StorageKey, _value: &str) -> AppResult<()> {
            Err(AppError::Storage(format!("{} is read-only", key)))
        }

        fn name(&self) -> &'static str {
            "unavailable"
        }
    }

    #[test]
    fn test_read_failure_hydrates_empty() {
        let store = CollectionStore::open(Arc::new(UnavailableStorage));

        assert_eq!(store.lifecycle(), Lifecycle::Hydrated);
        for kind in CollectionKind::ALL {
            assert!(store.is_empty(kind));
        }
    }

    #[test]
    fn test_write_failure_keeps_in_memory_toggle() {
        let mut store = CollectionStore::open(Arc::new(UnavailableStorage));

        assert!(store.toggle(CollectionKind::Watchlist, movie(1)));
        assert!(store.toggle(CollectionKind::Watchlist, movie(2)));

        assert_eq!(store.lifecycle(), Lifecycle::Active);
        assert!(store.is_member(CollectionKind::Watchlist, 1));
        assert_eq!(store.len(CollectionKind::Watchlist), 2);

        assert!(!store.toggle(CollectionKind::Watchlist, movie(1)));
        assert_eq!(ids(&store, CollectionKind::Watchlist), vec![2]);
    }

    #[test]
    fn test_new_store_is_uninitialized() {
        let store = CollectionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.lifecycle(), Lifecycle::Uninitialized);
        assert!(store.is_empty(CollectionKind::Watchlist));
    }

    #[test]
    fn test_toggle_appends_then_removes() {
        let mut store = CollectionStore::open(Arc::new(MemoryStorage::new()));

        assert!(store.toggle(CollectionKind::Watchlist, movie(1)));
        assert!(store.toggle(CollectionKind::Watchlist, movie(2)));
        assert_eq!(ids(&store, CollectionKind::Watchlist), vec![1, 2]);

        assert!(!store.toggle(CollectionKind::Watchlist, movie(1)));
        assert_eq!(ids(&store, CollectionKind::Watchlist), vec![2]);
        assert_eq!(store.lifecycle(), Lifecycle::Active);
    }

    #[test]
    fn test_toggle_matches_on_id_only() {
        let mut store = CollectionStore::open(Arc::new(MemoryStorage::new()));
        store.toggle(CollectionKind::Favorites, movie(7));

        let renamed = MovieSummary {
            title: Some("Different payload".to_string()),
            ..movie(7)
        };
        assert!(!store.toggle(CollectionKind::Favorites, renamed));
        assert!(store.is_empty(CollectionKind::Favorites));
    }

    #[test]
    fn test_collections_are_independent() {
        let mut store = CollectionStore::open(Arc::new(MemoryStorage::new()));
        store.toggle(CollectionKind::Watched, movie(3));

        assert!(store.is_member(CollectionKind::Watched, 3));
        assert!(!store.is_member(CollectionKind::Watchlist, 3));
        assert!(!store.is_member(CollectionKind::Favorites, 3));
    }

    #[test]
    fn test_each_toggle_writes_full_collection() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CollectionStore::open(storage.clone());

        store.toggle(CollectionKind::Watchlist, movie(1));
        store.toggle(CollectionKind::Watchlist, movie(2));

        let writes = storage.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].0, "tawsyah_watchlist");

        let persisted: Vec<MovieSummary> = serde_json::from_str(&writes[1].1).unwrap();
        assert_eq!(persisted, vec![movie(1), movie(2)]);
    }

    #[test]
    fn test_hydrate_does_not_write() {
        let key = StorageKey::Collection(CollectionKind::Favorites);
        let storage = Arc::new(
            MemoryStorage::new().with_value(key, serde_json::to_string(&vec![movie(4)]).unwrap()),
        );

        let store = CollectionStore::open(storage.clone());

        assert_eq!(store.lifecycle(), Lifecycle::Hydrated);
        assert!(store.is_member(CollectionKind::Favorites, 4));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_unparseable_value_becomes_empty() {
        let key = StorageKey::Collection(CollectionKind::Watchlist);
        let storage = Arc::new(MemoryStorage::new().with_value(key, "{not json"));

        let store = CollectionStore::open(storage.clone());

        assert!(store.is_empty(CollectionKind::Watchlist));
        assert_eq!(storage.value(&key).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_toggle_before_hydrate_keeps_saved_items() {
        let key = StorageKey::Collection(CollectionKind::Watchlist);
        let storage = Arc::new(
            MemoryStorage::new().with_value(key, serde_json::to_string(&vec![movie(1)]).unwrap()),
        );

        let mut store = CollectionStore::new(storage.clone());
        store.toggle(CollectionKind::Watchlist, movie(2));

        assert_eq!(ids(&store, CollectionKind::Watchlist), vec![1, 2]);
        let persisted: Vec<MovieSummary> =
            serde_json::from_str(&storage.value(&key).unwrap()).unwrap();
        assert_eq!(persisted.len(), 2);
    }

    #[test]
    fn test_stored_duplicates_are_collapsed() {
        let key = StorageKey::Collection(CollectionKind::Watched);
        let raw = r#"[{"id": 1, "title": "first"}, {"id": 1, "title": "second"}, {"id": 2}]"#;
        let storage = Arc::new(MemoryStorage::new().with_value(key, raw));

        let store = CollectionStore::open(storage);

        assert_eq!(ids(&store, CollectionKind::Watched), vec![1, 2]);
        assert_eq!(
            store.collection(CollectionKind::Watched)[0].title.as_deref(),
            Some("first")
        );
    }
}
