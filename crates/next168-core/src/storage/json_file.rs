//! Single-document JSON file backend.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::WeekDataRepository;
use crate::error::StorageError;
use crate::schedule::WeekData;

/// Stores the week as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write(&self, data: &WeekData) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<WeekData>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn remove(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl WeekDataRepository for JsonFileRepository {
    fn name(&self) -> &str {
        "json"
    }

    fn save(&self, data: &WeekData) -> bool {
        match self.write(data) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to save week data"
                );
                false
            }
        }
    }

    fn load(&self) -> Option<WeekData> {
        self.read().unwrap_or_else(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to load week data");
            None
        })
    }

    fn clear(&self) -> bool {
        match self.remove() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to clear week data"
                );
                false
            }
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}
