use clap::Subcommand;
use next168_core::schedule::{format_duration, weekday_name};
use next168_core::CategoryStats;
use serde::Serialize;

use super::{open_store, Session};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Per-category usage and weekly totals as JSON
    Show,
    /// Day-by-day agenda of the week
    Week,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NamedStats<'a> {
    name: &'a str,
    weekly_hour_limit: f64,
    #[serde(flatten)]
    stats: CategoryStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekSummary<'a> {
    categories: Vec<NamedStats<'a>>,
    total_scheduled_hours: f64,
    unscheduled_hours: f64,
}

pub fn run(action: StatsAction, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(session)?;

    match action {
        StatsAction::Show => {
            let categories = store
                .categories()
                .iter()
                .zip(store.category_stats())
                .map(|(category, stats)| NamedStats {
                    name: &category.name,
                    weekly_hour_limit: category.weekly_hour_limit,
                    stats,
                })
                .collect();
            let summary = WeekSummary {
                categories,
                total_scheduled_hours: store.total_scheduled_hours(),
                unscheduled_hours: store.unscheduled_hours(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Week => {
            for day in 0..7u8 {
                println!("{}", weekday_name(day).unwrap_or("?"));
                let blocks = store.time_blocks_for_day(day);
                if blocks.is_empty() {
                    println!("  (nothing scheduled)");
                }
                for block in blocks {
                    let category = store
                        .category(&block.category_id)
                        .map_or("?", |c| c.name.as_str());
                    println!(
                        "  {}-{}  {:<24} {:>7}  [{}]",
                        block.start_time,
                        block.end_time,
                        block.title,
                        format_duration(u64::from(block.duration_minutes)),
                        category
                    );
                }
            }
            println!(
                "Scheduled: {:.2}h  Unscheduled: {:.2}h",
                store.total_scheduled_hours(),
                store.unscheduled_hours()
            );
        }
    }
    Ok(())
}
