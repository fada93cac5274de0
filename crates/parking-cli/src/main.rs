use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;
mod menu;
mod render;

#[derive(Parser)]
#[command(name = "parking")]
#[command(
    about = "Parking - slot allocation and billing for a multi-floor facility",
    long_about = None
)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the snapshot file (overrides the config)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive counter menu (default)
    Run,
    /// Show free slots per floor and parked vehicles
    Status,
    /// Show completed sessions of a vehicle
    History {
        /// Vehicle identifier
        vehicle: String,
    },
    /// Show what a parked vehicle would pay if it left now
    Quote {
        /// Vehicle identifier
        vehicle: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let context = bootstrap::Bootstrap::new(cli.config, cli.snapshot)?;
    context.init_tracing();
    let service = context.open_service()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(service)?,
        Commands::Status => commands::status::show(&service),
        Commands::History { vehicle } => commands::history::show(&service, &vehicle),
        Commands::Quote { vehicle } => commands::quote::show(&service, &vehicle)?,
    }

    Ok(())
}
