//! Time block commands for CLI.

use chrono::Datelike;
use clap::Subcommand;
use next168_core::{NewTimeBlock, TimeBlockPatch};

use super::{open_store, parse_day, resolve_category, Session};

#[derive(Subcommand)]
pub enum BlockAction {
    /// Schedule a new time block
    Add {
        /// Block title
        title: String,
        /// Category ID or name
        #[arg(long)]
        category: String,
        /// Day of week (0-6, Sunday = 0, or a name like "mon")
        #[arg(long, value_parser = parse_day)]
        day: u8,
        /// Start time (HH:mm)
        #[arg(long)]
        start: String,
        /// End time (HH:mm)
        #[arg(long)]
        end: String,
        /// Additional days, comma-separated
        #[arg(long, value_delimiter = ',', value_parser = parse_day)]
        repeat: Vec<u8>,
        /// Block description
        #[arg(long)]
        description: Option<String>,
    },
    /// List time blocks
    List {
        /// Only blocks occurring on this day, sorted by start time
        #[arg(long, value_parser = parse_day, conflicts_with = "today")]
        day: Option<u8>,
        /// Only blocks occurring today
        #[arg(long)]
        today: bool,
    },
    /// Update a time block
    Update {
        /// Time block ID
        id: String,
        /// New category ID or name
        #[arg(long)]
        category: Option<String>,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
        /// New day of week
        #[arg(long, value_parser = parse_day)]
        day: Option<u8>,
        /// New start time (HH:mm)
        #[arg(long)]
        start: Option<String>,
        /// New end time (HH:mm)
        #[arg(long)]
        end: Option<String>,
        /// Replace the additional days, comma-separated
        #[arg(
            long,
            value_delimiter = ',',
            value_parser = parse_day,
            conflicts_with = "clear_repeat"
        )]
        repeat: Option<Vec<u8>>,
        /// Remove all additional days
        #[arg(long)]
        clear_repeat: bool,
    },
    /// Delete a time block
    Delete {
        /// Time block ID
        id: String,
    },
}

pub fn run(action: BlockAction, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(session)?;

    match action {
        BlockAction::Add {
            title,
            category,
            day,
            start,
            end,
            repeat,
            description,
        } => {
            let category_id = resolve_category(&store, &category)?;
            let block = store.add_time_block(NewTimeBlock {
                category_id,
                title,
                description,
                day_of_week: day,
                start_time: start,
                end_time: end,
                repeat_days: (!repeat.is_empty()).then_some(repeat),
            })?;
            println!("Time block created: {}", block.id);
            println!("{}", serde_json::to_string_pretty(&block)?);
        }
        BlockAction::List { day, today } => {
            let day = if today {
                Some(chrono::Local::now().weekday().num_days_from_sunday() as u8)
            } else {
                day
            };
            match day {
                Some(day) => {
                    let blocks = store.time_blocks_for_day(day);
                    println!("{}", serde_json::to_string_pretty(&blocks)?);
                }
                None => println!("{}", serde_json::to_string_pretty(store.time_blocks())?),
            }
        }
        BlockAction::Update {
            id,
            category,
            title,
            description,
            clear_description,
            day,
            start,
            end,
            repeat,
            clear_repeat,
        } => {
            let category_id = category
                .map(|c| resolve_category(&store, &c))
                .transpose()?;
            let patch = TimeBlockPatch {
                category_id,
                title,
                description: if clear_description { Some(None) } else { description.map(Some) },
                day_of_week: day,
                start_time: start,
                end_time: end,
                repeat_days: if clear_repeat { Some(None) } else { repeat.map(Some) },
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            let block = store.update_time_block(&id, &patch)?;
            println!("Time block updated:");
            println!("{}", serde_json::to_string_pretty(&block)?);
        }
        BlockAction::Delete { id } => {
            if store.delete_time_block(&id) {
                println!("Time block deleted: {id}");
            } else {
                println!("Time block not found: {id}");
            }
        }
    }
    Ok(())
}
