//! Snapshot export/import and reset commands for CLI.

use clap::Subcommand;
use next168_core::storage::data_dir;
use next168_core::WeekData;
use std::path::PathBuf;

use super::{open_store, Session};

#[derive(Subcommand)]
pub enum DataAction {
    /// Print the week snapshot as JSON, or write it to a file
    Export {
        /// Output file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the week with a validated snapshot file
    Import {
        /// Snapshot JSON file
        file: PathBuf,
    },
    /// Delete all categories and time blocks
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show the data directory
    Path,
}

pub fn run(action: DataAction, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Export { output } => {
            let store = open_store(session)?;
            let json = serde_json::to_string_pretty(&store.snapshot())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        DataAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let data: WeekData = serde_json::from_str(&content)?;
            let mut store = open_store(session)?;
            store.import(data)?;
            println!(
                "Imported {} categories and {} time blocks",
                store.categories().len(),
                store.time_blocks().len()
            );
        }
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear without --yes".into());
            }
            let mut store = open_store(session)?;
            if !store.clear() {
                return Err("failed to clear storage".into());
            }
            println!("All data cleared");
        }
        DataAction::Path => {
            println!("{}", data_dir()?.display());
        }
    }
    Ok(())
}
