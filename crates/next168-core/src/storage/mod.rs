mod config;
pub mod json_file;
pub mod memory;
pub mod sqlite;

pub use config::{Config, StorageBackend, StorageConfig};
pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::schedule::WeekData;

/// Persistence boundary for the schedule store.
///
/// Implementations never panic or propagate errors: failures are logged and
/// reported as `false` (save/clear) or `None` (load on a miss or a corrupt
/// document).
pub trait WeekDataRepository {
    /// Short backend name used in log lines (e.g. "json", "sqlite").
    fn name(&self) -> &str;

    fn save(&self, data: &WeekData) -> bool;

    fn load(&self) -> Option<WeekData>;

    fn clear(&self) -> bool;

    fn exists(&self) -> bool;
}

/// Returns `~/.config/next168[-dev]/` based on NEXT168_ENV.
///
/// Set NEXT168_ENV=dev to use development data directory.
/// NEXT168_DATA_DIR overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("NEXT168_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("NEXT168_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("next168-dev")
            } else {
                base_dir.join("next168")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Build the repository selected by `config`, rooted in the data directory.
///
/// # Errors
/// Returns an error if the data directory or the SQLite database cannot be
/// opened.
pub fn open_repository(config: &Config) -> Result<Box<dyn WeekDataRepository>, StorageError> {
    open_repository_in(config, &data_dir()?)
}

/// Build the repository selected by `config`, rooted in `dir`.
pub fn open_repository_in(
    config: &Config,
    dir: &Path,
) -> Result<Box<dyn WeekDataRepository>, StorageError> {
    let storage = &config.storage;
    let repository: Box<dyn WeekDataRepository> = match storage.backend {
        StorageBackend::Json => Box::new(JsonFileRepository::new(dir.join(&storage.file_name))),
        StorageBackend::Sqlite => Box::new(SqliteRepository::open(
            &dir.join(&storage.database_name),
            &storage.key,
        )?),
        StorageBackend::Memory => Box::new(MemoryRepository::new()),
    };
    tracing::debug!(backend = repository.name(), dir = %dir.display(), "opened repository");
    Ok(repository)
}
