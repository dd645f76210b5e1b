//! Validation engine for categories and time blocks.
//!
//! All functions here are pure: they inspect a candidate against the current
//! collections and report problems, never mutating anything. Structural checks
//! accumulate every message; the budget check stops at the first failure.
//!
//! Checks performed:
//! - required fields and `HH:mm` formats
//! - positive, non-wrapping durations of at most 24 hours
//! - overlap with any other block sharing a weekday
//! - per-category weekly hour budgets, counting each unique weekday once

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::ScheduleError;
use crate::schedule::{
    count_unique_days, intervals_overlap, minutes_to_hours, parse_time, unique_days, Category,
    TimeBlock, WeekData, MINUTES_PER_DAY, TOTAL_WEEK_HOURS,
};

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn single(error: String) -> Self {
        Self::from_errors(vec![error])
    }

    /// Convert into a store error carrying every message.
    pub fn into_result(self) -> Result<(), ScheduleError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ScheduleError::Invalid(self.errors))
        }
    }
}

/// Structural and overlap checks for a block about to be committed.
///
/// `existing` is the current collection; an entry with the candidate's own id
/// is skipped so an edited block does not collide with its previous state.
pub fn validate_time_block(candidate: &TimeBlock, existing: &[TimeBlock]) -> ValidationResult {
    let mut errors = Vec::new();

    if candidate.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }

    if candidate.category_id.is_empty() {
        errors.push("Category is required".to_string());
    }

    if candidate.day_of_week > 6 {
        errors.push("Valid day of week is required".to_string());
    }

    if candidate
        .repeat_days
        .as_deref()
        .is_some_and(|days| days.iter().any(|d| *d > 6))
    {
        errors.push("Valid repeat days are required".to_string());
    }

    let start = parse_time(&candidate.start_time);
    if start.is_none() {
        errors.push("Valid start time is required (HH:mm format)".to_string());
    }

    let end = parse_time(&candidate.end_time);
    if end.is_none() {
        errors.push("Valid end time is required (HH:mm format)".to_string());
    }

    if let (Some(start), Some(end)) = (start, end) {
        let duration = end as i32 - start as i32;
        if duration <= 0 {
            errors.push("End time must be after start time".to_string());
        }
        if duration > MINUTES_PER_DAY {
            errors.push("Time block cannot exceed 24 hours".to_string());
        }

        if let Some(other) = find_overlap(candidate, start, end, existing) {
            errors.push(format!("Time overlaps with \"{}\"", other.title));
        }
    }

    ValidationResult::from_errors(errors)
}

/// First block sharing a weekday with `candidate` whose interval intersects
/// `[start, end)`. Blocks with malformed times never match.
fn find_overlap<'a>(
    candidate: &TimeBlock,
    start: u32,
    end: u32,
    existing: &'a [TimeBlock],
) -> Option<&'a TimeBlock> {
    let candidate_days = unique_days(candidate.day_of_week, candidate.repeat_days.as_deref());

    existing.iter().find(|block| {
        if block.id == candidate.id {
            return false;
        }
        let block_days = unique_days(block.day_of_week, block.repeat_days.as_deref());
        if candidate_days.is_disjoint(&block_days) {
            return false;
        }
        match (parse_time(&block.start_time), parse_time(&block.end_time)) {
            (Some(s2), Some(e2)) => intervals_overlap(start, end, s2, e2),
            _ => false,
        }
    })
}

/// Required fields and limit range for a category.
pub fn validate_category(candidate: &Category) -> ValidationResult {
    let mut errors = Vec::new();

    if candidate.name.trim().is_empty() {
        errors.push("Category name is required".to_string());
    }

    if candidate.color.trim().is_empty() {
        errors.push("Category color is required".to_string());
    }

    let limit = candidate.weekly_hour_limit;
    // NaN fails this comparison as well
    if !(limit > 0.0) || limit.is_infinite() {
        errors.push("Weekly hour limit must be greater than 0".to_string());
    } else if limit > TOTAL_WEEK_HOURS {
        errors.push(format!(
            "Weekly hour limit cannot exceed {TOTAL_WEEK_HOURS} hours (total hours in a week)"
        ));
    }

    ValidationResult::from_errors(errors)
}

/// Minutes scheduled against `category_id`, each block weighted by its unique
/// day count. `exclude_block_id` leaves one block out (the one being edited).
pub fn category_usage_minutes(
    category_id: &str,
    time_blocks: &[TimeBlock],
    exclude_block_id: Option<&str>,
) -> u64 {
    time_blocks
        .iter()
        .filter(|block| block.category_id == category_id)
        .filter(|block| exclude_block_id != Some(block.id.as_str()))
        .map(TimeBlock::weekly_cost_minutes)
        .sum()
}

/// Whether a block of `duration_minutes` fits in the category's weekly budget.
///
/// Callers should always pass `day_of_week`; without it the new block's
/// occurrences fall back to `1 + repeat_days.len()`, which over-counts when
/// `repeat_days` repeats the primary day.
pub fn can_add_time_to_category(
    category_id: &str,
    duration_minutes: u32,
    categories: &[Category],
    time_blocks: &[TimeBlock],
    exclude_block_id: Option<&str>,
    repeat_days: Option<&[u8]>,
    day_of_week: Option<u8>,
) -> ValidationResult {
    let Some(category) = categories.iter().find(|c| c.id == category_id) else {
        return ValidationResult::single("Category not found".to_string());
    };

    let current_usage = category_usage_minutes(category_id, time_blocks, exclude_block_id);

    let occurrences = match day_of_week {
        Some(day) => count_unique_days(day, repeat_days),
        None => 1 + repeat_days.map_or(0, <[u8]>::len),
    };
    let new_minutes = u64::from(duration_minutes) * occurrences as u64;

    let limit_minutes = category.limit_minutes();
    if (current_usage + new_minutes) as f64 > limit_minutes {
        let remaining_hours = (limit_minutes - current_usage as f64) / 60.0;
        return ValidationResult::single(format!(
            "Exceeds category limit. Only {remaining_hours:.2} hours remaining for \"{}\"",
            category.name
        ));
    }

    ValidationResult::ok()
}

/// Whole-snapshot consistency check, used before importing a week.
///
/// Checks:
/// 1. every category is structurally valid, ids are unique
/// 2. every block is structurally valid and overlaps none of the blocks
///    before it, ids are unique
/// 3. every block references an existing category
/// 4. no category is over budget
///
/// Durations are taken as stored; callers recompute them first.
pub fn validate_snapshot(week: &WeekData) -> ValidationResult {
    let mut errors = Vec::new();

    let mut category_ids = HashSet::new();
    for category in &week.categories {
        if !category_ids.insert(category.id.as_str()) {
            errors.push(format!("Duplicate category id \"{}\"", category.id));
        }
        for message in validate_category(category).errors {
            errors.push(format!("Category \"{}\": {message}", category.name));
        }
    }

    let mut block_ids = HashSet::new();
    for (index, block) in week.time_blocks.iter().enumerate() {
        if !block_ids.insert(block.id.as_str()) {
            errors.push(format!("Duplicate time block id \"{}\"", block.id));
        }
        for message in validate_time_block(block, &week.time_blocks[..index]).errors {
            errors.push(format!("Time block \"{}\": {message}", block.title));
        }
        if !block.category_id.is_empty() && !category_ids.contains(block.category_id.as_str()) {
            errors.push(format!("Time block \"{}\": Category not found", block.title));
        }
    }

    let mut usage: HashMap<&str, u64> = HashMap::new();
    for block in &week.time_blocks {
        *usage.entry(block.category_id.as_str()).or_default() += block.weekly_cost_minutes();
    }
    for category in &week.categories {
        let used = usage.get(category.id.as_str()).copied().unwrap_or(0);
        if used as f64 > category.limit_minutes() {
            errors.push(format!(
                "Category \"{}\": Exceeds category limit ({:.2} of {} hours scheduled)",
                category.name,
                minutes_to_hours(used),
                category.weekly_hour_limit
            ));
        }
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, limit: f64) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {id}"),
            color: "#3b82f6".to_string(),
            weekly_hour_limit: limit,
            icon: None,
        }
    }

    fn block(id: &str, day: u8, start: &str, end: &str, repeat: Option<Vec<u8>>) -> TimeBlock {
        let mut b = TimeBlock {
            id: id.to_string(),
            category_id: "c1".to_string(),
            title: format!("Block {id}"),
            description: None,
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            duration_minutes: 0,
            repeat_days: repeat,
        };
        b.refresh_duration();
        b
    }

    // === validate_time_block ===

    #[test]
    fn accepts_well_formed_block() {
        let result = validate_time_block(&block("b1", 1, "09:00", "10:00", None), &[]);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn accumulates_structural_errors() {
        let mut b = block("b1", 9, "9:00", "25:00", None);
        b.title = "   ".to_string();
        b.category_id.clear();
        let result = validate_time_block(&b, &[]);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Title is required",
                "Category is required",
                "Valid day of week is required",
                "Valid start time is required (HH:mm format)",
                "Valid end time is required (HH:mm format)",
            ]
        );
    }

    #[test]
    fn rejects_repeat_days_outside_week() {
        let b = block("b1", 1, "00:00", "01:00", Some(vec![0, 2, 7, 42]));
        let result = validate_time_block(&b, &[]);
        assert_eq!(result.errors, vec!["Valid repeat days are required"]);

        let full_week = block("b1", 1, "00:00", "01:00", Some(vec![0, 1, 2, 3, 4, 5, 6]));
        assert!(validate_time_block(&full_week, &[]).is_valid);
    }

    #[test]
    fn rejects_end_before_start() {
        let result = validate_time_block(&block("b1", 1, "10:00", "09:00", None), &[]);
        assert_eq!(result.errors, vec!["End time must be after start time"]);
    }

    #[test]
    fn rejects_zero_length_block() {
        let result = validate_time_block(&block("b1", 1, "10:00", "10:00", None), &[]);
        assert_eq!(result.errors, vec!["End time must be after start time"]);
    }

    #[test]
    fn accepts_almost_full_day() {
        let b = block("b1", 1, "00:00", "23:59", None);
        assert_eq!(b.duration_minutes, 1439);
        assert!(validate_time_block(&b, &[]).is_valid);
    }

    #[test]
    fn adjacent_blocks_do_not_overlap() {
        let existing = vec![block("b1", 1, "09:00", "10:00", None)];
        let result = validate_time_block(&block("b2", 1, "10:00", "11:00", None), &existing);
        assert!(result.is_valid);
    }

    #[test]
    fn one_minute_into_next_block_overlaps() {
        let existing = vec![block("b1", 1, "10:00", "11:00", None)];
        let result = validate_time_block(&block("b2", 1, "09:00", "10:01", None), &existing);
        assert_eq!(result.errors, vec!["Time overlaps with \"Block b1\""]);
    }

    #[test]
    fn same_time_on_other_day_is_fine() {
        let existing = vec![block("b1", 1, "09:00", "10:00", None)];
        let result = validate_time_block(&block("b2", 2, "09:00", "10:00", None), &existing);
        assert!(result.is_valid);
    }

    #[test]
    fn repeat_days_collide_with_primary_day() {
        let existing = vec![block("b1", 3, "09:00", "10:00", None)];
        let candidate = block("b2", 1, "09:30", "10:30", Some(vec![2, 3]));
        let result = validate_time_block(&candidate, &existing);
        assert_eq!(result.errors, vec!["Time overlaps with \"Block b1\""]);
    }

    #[test]
    fn primary_day_collides_with_existing_repeat_days() {
        let existing = vec![block("b1", 0, "18:00", "19:00", Some(vec![4, 5]))];
        let candidate = block("b2", 5, "18:30", "20:00", None);
        assert!(!validate_time_block(&candidate, &existing).is_valid);
    }

    #[test]
    fn reports_only_first_overlap() {
        let existing = vec![
            block("b1", 1, "09:00", "10:00", None),
            block("b2", 1, "10:00", "11:00", None),
        ];
        let result = validate_time_block(&block("b3", 1, "09:30", "10:30", None), &existing);
        assert_eq!(result.errors, vec!["Time overlaps with \"Block b1\""]);
    }

    #[test]
    fn skips_own_previous_state() {
        let existing = vec![block("b1", 1, "09:00", "10:00", None)];
        let moved = block("b1", 1, "09:30", "10:30", None);
        assert!(validate_time_block(&moved, &existing).is_valid);
    }

    // === validate_category ===

    #[test]
    fn category_requires_name_color_and_positive_limit() {
        let mut c = category("c1", 0.0);
        c.name = " ".to_string();
        c.color = String::new();
        let result = validate_category(&c);
        assert_eq!(
            result.errors,
            vec![
                "Category name is required",
                "Category color is required",
                "Weekly hour limit must be greater than 0",
            ]
        );
    }

    #[test]
    fn category_limit_capped_at_week_length() {
        assert!(validate_category(&category("c1", 168.0)).is_valid);
        let result = validate_category(&category("c1", 168.5));
        assert_eq!(
            result.errors,
            vec!["Weekly hour limit cannot exceed 168 hours (total hours in a week)"]
        );
    }

    #[test]
    fn category_limit_rejects_nan() {
        assert!(!validate_category(&category("c1", f64::NAN)).is_valid);
        assert!(!validate_category(&category("c1", -4.0)).is_valid);
    }

    // === can_add_time_to_category ===

    #[test]
    fn unknown_category_is_terminal() {
        let result = can_add_time_to_category("nope", 60, &[], &[], None, None, Some(1));
        assert_eq!(result.errors, vec!["Category not found"]);
    }

    #[test]
    fn exactly_at_limit_is_accepted() {
        let categories = vec![category("c1", 40.0)];
        let daily = vec![block("b1", 0, "06:00", "07:00", Some(vec![1, 2, 3, 4, 5, 6]))];
        assert_eq!(category_usage_minutes("c1", &daily, None), 7 * 60);

        let fits =
            can_add_time_to_category("c1", 33 * 60, &categories, &daily, None, None, Some(1));
        assert!(fits.is_valid);

        let over =
            can_add_time_to_category("c1", 33 * 60 + 1, &categories, &daily, None, None, Some(1));
        assert_eq!(
            over.errors,
            vec!["Exceeds category limit. Only 33.00 hours remaining for \"Category c1\""]
        );
    }

    #[test]
    fn editing_all_days_block_excludes_itself() {
        let categories = vec![category("c1", 7.0)];
        let all_days = vec![block("b1", 1, "06:00", "07:00", Some(vec![0, 1, 2, 3, 4, 5, 6]))];
        assert_eq!(category_usage_minutes("c1", &all_days, None), 7 * 60);

        let result = can_add_time_to_category(
            "c1",
            60,
            &categories,
            &all_days,
            Some("b1"),
            Some(&[0, 1, 2, 3, 4, 5, 6]),
            Some(1),
        );
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn legacy_callers_count_repeat_days_raw() {
        let categories = vec![category("c1", 7.0)];
        let repeat = [0, 1, 2, 3, 4, 5, 6];
        // 8 occurrences without the primary day: 8h > 7h
        let legacy =
            can_add_time_to_category("c1", 60, &categories, &[], None, Some(&repeat), None);
        assert!(!legacy.is_valid);
        let unique =
            can_add_time_to_category("c1", 60, &categories, &[], None, Some(&repeat), Some(1));
        assert!(unique.is_valid);
    }

    #[test]
    fn other_categories_do_not_count() {
        let categories = vec![category("c1", 1.0)];
        let mut other = block("b1", 1, "00:00", "23:00", None);
        other.category_id = "c2".to_string();
        let result = can_add_time_to_category("c1", 60, &categories, &[other], None, None, Some(2));
        assert!(result.is_valid);
    }

    // === validate_snapshot ===

    #[test]
    fn snapshot_flags_dangling_and_duplicate_entries() {
        let mut dangling = block("b2", 2, "09:00", "10:00", None);
        dangling.category_id = "ghost".to_string();
        let week = WeekData {
            categories: vec![category("c1", 10.0), category("c1", 5.0)],
            time_blocks: vec![block("b1", 1, "09:00", "10:00", None), dangling],
        };
        let result = validate_snapshot(&week);
        assert!(result.errors.contains(&"Duplicate category id \"c1\"".to_string()));
        assert!(result
            .errors
            .contains(&"Time block \"Block b2\": Category not found".to_string()));
    }

    #[test]
    fn snapshot_flags_repeat_days_outside_week() {
        let week = WeekData {
            categories: vec![category("c1", 168.0)],
            time_blocks: vec![block("b1", 1, "00:00", "01:00", Some(vec![8, 200]))],
        };
        let result = validate_snapshot(&week);
        assert_eq!(
            result.errors,
            vec!["Time block \"Block b1\": Valid repeat days are required"]
        );
    }

    #[test]
    fn snapshot_flags_overlaps_and_budget() {
        let week = WeekData {
            categories: vec![category("c1", 1.0)],
            time_blocks: vec![
                block("b1", 1, "09:00", "10:00", None),
                block("b2", 1, "09:30", "10:30", None),
            ],
        };
        let result = validate_snapshot(&week);
        assert!(result
            .errors
            .contains(&"Time block \"Block b2\": Time overlaps with \"Block b1\"".to_string()));
        assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("Category \"Category c1\": Exceeds category limit")));
    }
}
