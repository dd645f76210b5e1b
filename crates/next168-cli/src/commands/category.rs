//! Category management commands for CLI.

use clap::Subcommand;
use next168_core::{CategoryPatch, NewCategory};

use super::{open_store, resolve_category, Session};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Weekly hour limit (0 < limit <= 168)
        #[arg(long)]
        limit: f64,
        /// Display color
        #[arg(long, default_value = "#3b82f6")]
        color: String,
        /// Display icon
        #[arg(long)]
        icon: Option<String>,
    },
    /// List categories
    List,
    /// Update a category
    Update {
        /// Category ID or name
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
        /// New weekly hour limit
        #[arg(long)]
        limit: Option<f64>,
        /// New icon
        #[arg(long, conflicts_with = "clear_icon")]
        icon: Option<String>,
        /// Remove the icon
        #[arg(long)]
        clear_icon: bool,
    },
    /// Delete a category without time blocks
    Delete {
        /// Category ID or name
        id: String,
    },
}

pub fn run(action: CategoryAction, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(session)?;

    match action {
        CategoryAction::Add {
            name,
            limit,
            color,
            icon,
        } => {
            let category = store.add_category(NewCategory {
                name,
                color,
                weekly_hour_limit: limit,
                icon,
            })?;
            println!("Category created: {}", category.id);
            println!("{}", serde_json::to_string_pretty(&category)?);
        }
        CategoryAction::List => {
            println!("{}", serde_json::to_string_pretty(store.categories())?);
        }
        CategoryAction::Update {
            id,
            name,
            color,
            limit,
            icon,
            clear_icon,
        } => {
            let id = resolve_category(&store, &id)?;
            let patch = CategoryPatch {
                name,
                color,
                weekly_hour_limit: limit,
                icon: if clear_icon { Some(None) } else { icon.map(Some) },
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            let category = store.update_category(&id, &patch)?;
            println!("Category updated:");
            println!("{}", serde_json::to_string_pretty(&category)?);
        }
        CategoryAction::Delete { id } => {
            let id = resolve_category(&store, &id)?;
            store.delete_category(&id)?;
            println!("Category deleted: {id}");
        }
    }
    Ok(())
}
