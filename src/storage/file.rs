use std::path::PathBuf;

use crate::error::{AppError, AppResult};

use super::{StorageBackend, StorageKey};

/// Stores each key as `<key>.json` inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &StorageKey, value: &str) -> AppResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        // Write to a sibling file first so a crash never leaves a half-written value
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                tracing::warn!(
                    error = %cleanup,
                    path = %tmp_path.display(),
                    "Failed to remove temp file"
                );
            }
            return Err(e.into());
        }

        tracing::debug!(key = %key, path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
