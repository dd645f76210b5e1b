//! Starter week written on first run when no saved data exists.

use uuid::Uuid;

use super::{Category, TimeBlock, WeekData};

fn category(name: &str, color: &str, limit: f64, icon: &str) -> Category {
    Category {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        color: color.to_string(),
        weekly_hour_limit: limit,
        icon: Some(icon.to_string()),
    }
}

fn block(
    category: &Category,
    title: &str,
    description: &str,
    day: u8,
    start: &str,
    end: &str,
) -> TimeBlock {
    let mut block = TimeBlock {
        id: Uuid::new_v4().to_string(),
        category_id: category.id.clone(),
        title: title.to_string(),
        description: Some(description.to_string()),
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        duration_minutes: 0,
        repeat_days: None,
    };
    block.refresh_duration();
    block
}

/// Four categories and a handful of Monday/Tuesday blocks, all within budget.
pub fn sample_week() -> WeekData {
    let work = category("Work", "#3b82f6", 40.0, "💼");
    let exercise = category("Exercise", "#10b981", 7.0, "🏃");
    let learning = category("Learning", "#f59e0b", 10.0, "📚");
    let projects = category("Personal Projects", "#8b5cf6", 15.0, "🚀");

    let time_blocks = vec![
        block(&work, "Morning Stand-up", "Daily team sync", 1, "09:00", "09:30"),
        block(&work, "Deep Work Session", "Focus time for coding", 1, "10:00", "12:00"),
        block(&exercise, "Morning Run", "5K run", 1, "06:30", "07:30"),
        block(&learning, "Online Course", "Advanced Rust patterns", 2, "19:00", "21:00"),
    ];

    WeekData {
        categories: vec![work, exercise, learning, projects],
        time_blocks,
    }
}
