// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Oncall - an on-call rotation scheduler.
//!
//! This is the binary entry point for the oncall server and its
//! maintenance subcommands.

mod serve;

use clap::{Parser, Subcommand};
use oncall_config::OncallConfig;
use oncall_core::OncallError;
use oncall_storage::Database;

/// Oncall - an on-call rotation scheduler.
#[derive(Parser, Debug)]
#[command(name = "oncall", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the oncall HTTP server.
    Serve,
    /// Seed demo people, a team, and a current-year schedule.
    Seed,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match oncall_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            oncall_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Seed) => run_seed(&config).await,
        Some(Commands::Config) => run_config(&config),
        None => {
            println!("oncall: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Runs the `oncall seed` command against the configured database.
async fn run_seed(config: &OncallConfig) -> Result<(), OncallError> {
    let db = Database::open(&config.storage.database_path).await?;
    let seeded = oncall_storage::seed::seed_demo_data(&db).await?;
    if seeded {
        println!("oncall seed: demo data created");
    } else {
        println!("oncall seed: skipped (people already exist)");
    }
    db.close().await?;
    Ok(())
}

/// Prints the effective configuration as TOML, after defaults and
/// environment overrides have been applied.
fn run_config(config: &OncallConfig) -> Result<(), OncallError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| OncallError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}
