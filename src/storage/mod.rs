//! Durable key/value storage for client-side state
//!
//! The collection store talks to storage only through [`StorageBackend`], so the
//! same store runs against files on disk or an in-memory fake in tests.

use std::fmt::Display;

use crate::{error::AppResult, models::CollectionKind};

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Namespace prefix shared by every persisted key
pub const KEY_PREFIX: &str = "tawsyah";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Collection(CollectionKind),
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Collection(kind) => write!(f, "{}_{}", KEY_PREFIX, kind),
        }
    }
}

/// Persistence port: read and overwrite whole values by key
pub trait StorageBackend: Send + Sync {
    /// Returns the raw stored value, or `None` when the key was never written
    fn read(&self, key: &StorageKey) -> AppResult<Option<String>>;

    /// Replaces the stored value for `key`
    fn write(&self, key: &StorageKey, value: &str) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_display_watchlist() {
        let key = StorageKey::Collection(CollectionKind::Watchlist);
        assert_eq!(format!("{}", key), "tawsyah_watchlist");
    }

    #[test]
    fn test_storage_key_display_favorites() {
        let key = StorageKey::Collection(CollectionKind::Favorites);
        assert_eq!(format!("{}", key), "tawsyah_favorites");
    }

    #[test]
    fn test_storage_key_display_watched() {
        let key = StorageKey::Collection(CollectionKind::Watched);
        assert_eq!(format!("{}", key), "tawsyah_watched");
    }
}
