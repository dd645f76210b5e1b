//! Schedule types: categories, time blocks, and the persisted week snapshot.
//!
//! Field names serialize in camelCase so a snapshot written by one backend
//! reads the same everywhere (`weeklyHourLimit`, `dayOfWeek`, `repeatDays`, ...).

use serde::{Deserialize, Serialize};

pub mod days;
pub mod sample;
pub mod time;

pub use days::{
    count_unique_days, occurs_on, parse_weekday, unique_days, weekday_name, weekly_cost_minutes,
};
pub use time::{duration_minutes, format_duration, intervals_overlap, minutes_to_hours, parse_time};

/// Hours in a week; the ceiling for any category limit.
pub const TOTAL_WEEK_HOURS: f64 = 168.0;

/// Longest interval a single block may cover.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// A named weekly time budget with an hour cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub weekly_hour_limit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn limit_minutes(&self) -> f64 {
        self.weekly_hour_limit * 60.0
    }
}

/// A scheduled interval on the weekly grid.
///
/// The interval is replicated across `day_of_week` and every entry of
/// `repeat_days`. Duplicates in `repeat_days` are tolerated; all cost and
/// overlap computations work on the unique day set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: String,
    pub category_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub day_of_week: u8, // 0=Sun ... 6=Sat
    pub start_time: String, // HH:mm
    pub end_time: String, // HH:mm
    /// Always recomputed from `start_time`/`end_time` by the store.
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_days: Option<Vec<u8>>,
}

impl TimeBlock {
    /// Number of distinct weekdays this block occupies.
    pub fn unique_day_count(&self) -> usize {
        count_unique_days(self.day_of_week, self.repeat_days.as_deref())
    }

    /// Duration times unique day count.
    pub fn weekly_cost_minutes(&self) -> u64 {
        weekly_cost_minutes(self)
    }

    /// Recompute `duration_minutes` from the start and end times.
    ///
    /// Malformed or non-positive ranges yield 0; validation reports them.
    pub fn refresh_duration(&mut self) {
        self.duration_minutes = duration_minutes(&self.start_time, &self.end_time)
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or(0);
    }
}

/// Serializable snapshot of the whole week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub time_blocks: Vec<TimeBlock>,
}

/// Input for creating a category. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub weekly_hour_limit: f64,
    #[serde(default)]
    pub icon: Option<String>,
}

impl NewCategory {
    pub(crate) fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            color: self.color,
            weekly_hour_limit: self.weekly_hour_limit,
            icon: self.icon,
        }
    }
}

/// Input for creating a time block. The store assigns the id and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeBlock {
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub repeat_days: Option<Vec<u8>>,
}

impl NewTimeBlock {
    pub(crate) fn into_time_block(self, id: String) -> TimeBlock {
        let mut block = TimeBlock {
            id,
            category_id: self.category_id,
            title: self.title,
            description: self.description,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: 0,
            repeat_days: self.repeat_days,
        };
        block.refresh_duration();
        block
    }
}

/// Partial update for a category. Only supplied fields are overwritten.
///
/// `icon: Some(None)` clears the icon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub weekly_hour_limit: Option<f64>,
    pub icon: Option<Option<String>>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(limit) = self.weekly_hour_limit {
            category.weekly_hour_limit = limit;
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
    }
}

/// Partial update for a time block. Id and duration are not patchable.
///
/// `description: Some(None)` and `repeat_days: Some(None)` clear the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeBlockPatch {
    pub category_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub repeat_days: Option<Option<Vec<u8>>>,
}

impl TimeBlockPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the patch moves the start or end time.
    pub fn touches_times(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }

    /// Whether the patch can change what the block costs its category.
    pub fn touches_budget(&self) -> bool {
        self.category_id.is_some()
            || self.touches_times()
            || self.day_of_week.is_some()
            || self.repeat_days.is_some()
    }

    pub fn apply(&self, block: &mut TimeBlock) {
        if let Some(category_id) = &self.category_id {
            block.category_id = category_id.clone();
        }
        if let Some(title) = &self.title {
            block.title = title.clone();
        }
        if let Some(description) = &self.description {
            block.description = description.clone();
        }
        if let Some(day) = self.day_of_week {
            block.day_of_week = day;
        }
        if let Some(start) = &self.start_time {
            block.start_time = start.clone();
        }
        if let Some(end) = &self.end_time {
            block.end_time = end.clone();
        }
        if let Some(repeat_days) = &self.repeat_days {
            block.repeat_days = repeat_days.clone();
        }
        if self.touches_times() {
            block.refresh_duration();
        }
    }
}

/// Derived usage figures for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category_id: String,
    pub total_hours: f64,
    pub total_minutes: u64,
    pub percentage_of_week: f64,
    pub percentage_of_limit: f64,
    pub remaining_hours: f64,
}
