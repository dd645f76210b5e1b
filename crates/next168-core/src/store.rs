//! The schedule store: authoritative categories and time blocks.
//!
//! Every mutation runs the validation engine first and commits only when it
//! passes, so a rejected call leaves both collections exactly as they were.
//! After a commit the store persists the full snapshot through its
//! repository; a failed save is logged and the in-memory state stays the
//! source of truth for the rest of the session.

use uuid::Uuid;

use crate::error::{Result, ScheduleError};
use crate::schedule::sample::sample_week;
use crate::schedule::{
    minutes_to_hours, occurs_on, Category, CategoryPatch, CategoryStats, NewCategory,
    NewTimeBlock, TimeBlock, TimeBlockPatch, WeekData, TOTAL_WEEK_HOURS,
};
use crate::storage::{open_repository, Config, WeekDataRepository};
use crate::validation::{
    can_add_time_to_category, category_usage_minutes, validate_category, validate_snapshot,
    validate_time_block,
};

/// Result of a store mutation.
pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;

/// How [`ScheduleStore::load`] populated the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved snapshot was restored.
    Restored,
    /// Nothing was saved; the sample week was written.
    Seeded,
    /// Nothing was saved; the store starts empty.
    Empty,
}

/// Owns the live week and the repository it is persisted to.
pub struct ScheduleStore {
    categories: Vec<Category>,
    time_blocks: Vec<TimeBlock>,
    repository: Box<dyn WeekDataRepository>,
    seed_sample_data: bool,
}

impl ScheduleStore {
    /// An empty store over `repository`. Call [`ScheduleStore::load`] to
    /// restore saved data.
    pub fn new(repository: Box<dyn WeekDataRepository>) -> Self {
        Self {
            categories: Vec::new(),
            time_blocks: Vec::new(),
            repository,
            seed_sample_data: false,
        }
    }

    /// Write the sample week when `load` finds nothing saved.
    pub fn with_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }

    /// Open the configured repository and load it.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let repository = open_repository(config)?;
        let mut store = Self::new(repository).with_sample_data(config.seed_sample_data);
        store.load();
        Ok(store)
    }

    /// Replace the in-memory week with what the repository holds.
    pub fn load(&mut self) -> LoadOutcome {
        match self.repository.load() {
            Some(mut data) => {
                for block in &mut data.time_blocks {
                    block.refresh_duration();
                }
                let check = validate_snapshot(&data);
                if !check.is_valid {
                    tracing::warn!(errors = ?check.errors, "restored week is inconsistent");
                }
                tracing::debug!(
                    categories = data.categories.len(),
                    time_blocks = data.time_blocks.len(),
                    "restored week"
                );
                self.categories = data.categories;
                self.time_blocks = data.time_blocks;
                LoadOutcome::Restored
            }
            None if self.seed_sample_data => {
                let sample = sample_week();
                self.categories = sample.categories;
                self.time_blocks = sample.time_blocks;
                self.save();
                tracing::info!("no saved week found, wrote sample data");
                LoadOutcome::Seeded
            }
            None => {
                self.categories.clear();
                self.time_blocks.clear();
                LoadOutcome::Empty
            }
        }
    }

    /// Persist the current snapshot. Returns whether the repository accepted it.
    pub fn save(&self) -> bool {
        let saved = self.repository.save(&self.snapshot());
        if !saved {
            tracing::error!(
                backend = self.repository.name(),
                "failed to persist week; keeping in-memory state"
            );
        }
        saved
    }

    /// Copy of the current week.
    pub fn snapshot(&self) -> WeekData {
        WeekData {
            categories: self.categories.clone(),
            time_blocks: self.time_blocks.clone(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn time_blocks(&self) -> &[TimeBlock] {
        &self.time_blocks
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn time_block(&self, id: &str) -> Option<&TimeBlock> {
        self.time_blocks.iter().find(|b| b.id == id)
    }

    /// Weekly minutes scheduled against a category.
    pub fn category_usage_minutes(&self, category_id: &str) -> u64 {
        category_usage_minutes(category_id, &self.time_blocks, None)
    }

    // === Categories ===

    /// Validate and append a new category.
    pub fn add_category(&mut self, draft: NewCategory) -> ScheduleResult<Category> {
        let category = draft.into_category(Uuid::new_v4().to_string());
        if let Err(e) = validate_category(&category).into_result() {
            tracing::warn!(error = %e, "rejected new category");
            return Err(e);
        }

        self.categories.push(category.clone());
        tracing::debug!(id = %category.id, name = %category.name, "added category");
        self.save();
        Ok(category)
    }

    /// Apply `patch` to an existing category.
    ///
    /// Lowering the limit below what is already scheduled is rejected.
    pub fn update_category(
        &mut self,
        id: &str,
        patch: &CategoryPatch,
    ) -> ScheduleResult<Category> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(ScheduleError::CategoryNotFound)?;

        let current_limit = self.categories[index].weekly_hour_limit;
        let mut updated = self.categories[index].clone();
        patch.apply(&mut updated);
        validate_category(&updated).into_result()?;

        if let Some(new_limit) = patch.weekly_hour_limit {
            if new_limit < current_limit {
                let used = self.category_usage_minutes(id);
                if used as f64 > new_limit * 60.0 {
                    tracing::warn!(id, used, new_limit, "rejected limit reduction");
                    return Err(ScheduleError::LimitBelowUsage {
                        scheduled_hours: minutes_to_hours(used),
                    });
                }
            }
        }

        self.categories[index] = updated.clone();
        tracing::debug!(id, "updated category");
        self.save();
        Ok(updated)
    }

    /// Remove a category that no time block references.
    pub fn delete_category(&mut self, id: &str) -> ScheduleResult<()> {
        let blocks = self
            .time_blocks
            .iter()
            .filter(|b| b.category_id == id)
            .count();
        if blocks > 0 {
            return Err(ScheduleError::CategoryInUse { blocks });
        }

        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(ScheduleError::CategoryNotFound);
        }

        tracing::debug!(id, "deleted category");
        self.save();
        Ok(())
    }

    // === Time blocks ===

    /// Validate and append a new time block. The duration is derived from
    /// the start and end times.
    pub fn add_time_block(&mut self, draft: NewTimeBlock) -> ScheduleResult<TimeBlock> {
        let block = draft.into_time_block(Uuid::new_v4().to_string());

        let checked = validate_time_block(&block, &self.time_blocks)
            .into_result()
            .and_then(|()| {
                can_add_time_to_category(
                    &block.category_id,
                    block.duration_minutes,
                    &self.categories,
                    &self.time_blocks,
                    None,
                    block.repeat_days.as_deref(),
                    Some(block.day_of_week),
                )
                .into_result()
            });
        if let Err(e) = checked {
            tracing::warn!(title = %block.title, error = %e, "rejected new time block");
            return Err(e);
        }

        self.time_blocks.push(block.clone());
        tracing::debug!(id = %block.id, title = %block.title, "added time block");
        self.save();
        Ok(block)
    }

    /// Apply `patch` to an existing time block.
    ///
    /// The block is overlap-checked against everything but its own previous
    /// state; the budget is re-checked whenever the patch can change its cost.
    pub fn update_time_block(
        &mut self,
        id: &str,
        patch: &TimeBlockPatch,
    ) -> ScheduleResult<TimeBlock> {
        let index = self
            .time_blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or(ScheduleError::TimeBlockNotFound)?;

        let mut updated = self.time_blocks[index].clone();
        patch.apply(&mut updated);

        validate_time_block(&updated, &self.time_blocks).into_result()?;

        if patch.touches_budget() {
            can_add_time_to_category(
                &updated.category_id,
                updated.duration_minutes,
                &self.categories,
                &self.time_blocks,
                Some(id),
                updated.repeat_days.as_deref(),
                Some(updated.day_of_week),
            )
            .into_result()?;
        }

        self.time_blocks[index] = updated.clone();
        tracing::debug!(id, "updated time block");
        self.save();
        Ok(updated)
    }

    /// Remove a time block. Removal can only lower usage, so nothing is
    /// re-validated. Returns whether a block with `id` existed.
    pub fn delete_time_block(&mut self, id: &str) -> bool {
        let before = self.time_blocks.len();
        self.time_blocks.retain(|b| b.id != id);
        let removed = self.time_blocks.len() != before;
        tracing::debug!(id, removed, "deleted time block");
        self.save();
        removed
    }

    /// Blocks occurring on `day`, earliest start first.
    pub fn time_blocks_for_day(&self, day: u8) -> Vec<&TimeBlock> {
        let mut blocks: Vec<&TimeBlock> = self
            .time_blocks
            .iter()
            .filter(|b| occurs_on(b, day))
            .collect();
        // HH:mm is fixed width, so string order is time order
        blocks.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        blocks
    }

    // === Statistics ===

    pub fn category_stats(&self) -> Vec<CategoryStats> {
        self.categories
            .iter()
            .map(|category| {
                let total_minutes = self.category_usage_minutes(&category.id);
                let total_hours = minutes_to_hours(total_minutes);
                let limit_minutes = category.limit_minutes();
                let percentage_of_limit = if limit_minutes > 0.0 {
                    total_minutes as f64 / limit_minutes * 100.0
                } else {
                    0.0
                };

                CategoryStats {
                    category_id: category.id.clone(),
                    total_hours,
                    total_minutes,
                    percentage_of_week: total_hours / TOTAL_WEEK_HOURS * 100.0,
                    percentage_of_limit,
                    remaining_hours: category.weekly_hour_limit - total_hours,
                }
            })
            .collect()
    }

    pub fn total_scheduled_hours(&self) -> f64 {
        let total_minutes: u64 = self
            .time_blocks
            .iter()
            .map(TimeBlock::weekly_cost_minutes)
            .sum();
        minutes_to_hours(total_minutes)
    }

    pub fn unscheduled_hours(&self) -> f64 {
        TOTAL_WEEK_HOURS - self.total_scheduled_hours()
    }

    // === Whole-week operations ===

    /// Replace the week with `data` after checking it as a whole.
    ///
    /// Durations are recomputed from the stored times before validation.
    pub fn import(&mut self, mut data: WeekData) -> ScheduleResult<()> {
        for block in &mut data.time_blocks {
            block.refresh_duration();
        }
        if let Err(e) = validate_snapshot(&data).into_result() {
            tracing::warn!(error = %e, "rejected import");
            return Err(e);
        }

        self.categories = data.categories;
        self.time_blocks = data.time_blocks;
        tracing::info!(
            categories = self.categories.len(),
            time_blocks = self.time_blocks.len(),
            "imported week"
        );
        self.save();
        Ok(())
    }

    /// Drop every category and block and clear the repository.
    pub fn clear(&mut self) -> bool {
        self.categories.clear();
        self.time_blocks.clear();
        let cleared = self.repository.clear();
        if !cleared {
            tracing::error!(backend = self.repository.name(), "failed to clear storage");
        }
        cleared
    }
}
