//! # next168 Core Library
//!
//! This library provides the core logic for next168, a weekly time-budgeting
//! tool: categories carry a weekly hour cap, time blocks sit on a 7×24 grid,
//! and every mutation is checked so blocks never overlap and no category goes
//! over its cap. The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Schedule types**: categories, time blocks, patches, and the persisted
//!   week snapshot, plus weekday-set and `HH:mm` arithmetic helpers
//! - **Validation**: pure checks for structure, overlap, and budgets
//! - **Store**: owns the live week, commits only validated mutations, and
//!   derives usage statistics
//! - **Storage**: repository backends (JSON file, SQLite, memory) and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ScheduleStore`]: validated mutations and statistics
//! - [`WeekDataRepository`]: persistence boundary
//! - [`Config`]: application configuration management

pub mod error;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod validation;

pub use error::{ConfigError, CoreError, ScheduleError, StorageError};
pub use schedule::{
    count_unique_days, Category, CategoryPatch, CategoryStats, NewCategory, NewTimeBlock,
    TimeBlock, TimeBlockPatch, WeekData, TOTAL_WEEK_HOURS,
};
pub use storage::{Config, StorageBackend, WeekDataRepository};
pub use store::{LoadOutcome, ScheduleResult, ScheduleStore};
pub use validation::{
    can_add_time_to_category, validate_category, validate_snapshot, validate_time_block,
    ValidationResult,
};
