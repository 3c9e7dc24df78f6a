use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

use super::{StorageBackend, StorageKey};

/// In-process storage that records every write
///
/// Useful as a stand-in for durable storage: tests seed it, hand it to a store,
/// then inspect `writes()` to see exactly what was persisted and when.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value without recording it as a write
    pub fn with_value(self, key: StorageKey, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.into());
        }
        self
    }

    /// Every write in order, as (key, value) pairs
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or_default()
    }

    /// Current value for a key, bypassing the trait
    pub fn value(&self, key: &StorageKey) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|v| v.get(&key.to_string()).cloned())
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(values.get(&key.to_string()).cloned())
    }

    fn write(&self, key: &StorageKey, value: &str) -> AppResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let mut writes = self
            .writes
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;

        values.insert(key.to_string(), value.to_string());
        writes.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
