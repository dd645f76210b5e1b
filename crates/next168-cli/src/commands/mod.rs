pub mod block;
pub mod category;
pub mod config;
pub mod data;
pub mod stats;

use next168_core::schedule::parse_weekday;
use next168_core::{Config, ScheduleStore, StorageBackend};

/// Global flags shared by the store-backed commands.
pub struct Session {
    pub ephemeral: bool,
}

/// Open the store described by the on-disk configuration.
///
/// Ephemeral sessions swap the configured backend for an in-memory one.
pub fn open_store(session: &Session) -> Result<ScheduleStore, Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if session.ephemeral {
        config.storage.backend = StorageBackend::Memory;
    }
    Ok(ScheduleStore::open(&config)?)
}

/// Resolve a category given by id or (case-insensitive) name.
pub fn resolve_category(store: &ScheduleStore, key: &str) -> Result<String, String> {
    if let Some(category) = store.category(key) {
        return Ok(category.id.clone());
    }
    store
        .categories()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(key))
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("Category not found: {key}"))
}

/// clap value parser for weekday arguments (`0`-`6` or a day name).
pub fn parse_day(input: &str) -> Result<u8, String> {
    parse_weekday(input).ok_or_else(|| format!("invalid day '{input}' (use 0-6 or a weekday name)"))
}
