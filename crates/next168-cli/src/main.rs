use clap::{Parser, Subcommand};
use next168_core::ScheduleError;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "next168", version, about = "Master your next 168 hours")]
struct Cli {
    /// Work on an in-memory copy of the week; saved data is left untouched
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Time block management
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Weekly usage statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Export, import, and reset saved data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NEXT168_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let session = commands::Session {
        ephemeral: cli.ephemeral,
    };
    let result = match cli.command {
        Commands::Category { action } => commands::category::run(action, &session),
        Commands::Block { action } => commands::block::run(action, &session),
        Commands::Stats { action } => commands::stats::run(action, &session),
        Commands::Data { action } => commands::data::run(action, &session),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        // Validation failures can carry several messages; report each one.
        match e.downcast_ref::<ScheduleError>() {
            Some(schedule) => {
                for message in schedule.messages() {
                    eprintln!("error: {message}");
                }
            }
            None => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
