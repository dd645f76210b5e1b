//! Core error types for next168-core.
//!
//! Store operations fail with [`ScheduleError`]; repositories and the
//! configuration layer have their own enums so the store can log and
//! swallow persistence failures without mixing them into business errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for next168-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A mutation was rejected by the validation engine
    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Reasons a store mutation was rejected.
///
/// The `Display` output is the user-facing message; the CLI prints it
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Structural or business-rule validation failed.
    #[error("{}", .0.join(", "))]
    Invalid(Vec<String>),

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Time block not found")]
    TimeBlockNotFound,

    /// Lowering a category limit below what is already scheduled.
    #[error("Cannot reduce limit below current usage ({scheduled_hours:.2} hours scheduled)")]
    LimitBelowUsage { scheduled_hours: f64 },

    /// Deleting a category that time blocks still reference.
    #[error("Cannot delete category with {blocks} scheduled time blocks")]
    CategoryInUse { blocks: usize },
}

impl ScheduleError {
    /// The individual messages behind this error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ScheduleError::Invalid(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] StorageError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
