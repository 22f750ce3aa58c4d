// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `oncall serve` command implementation.
//!
//! Opens the SQLite database, optionally seeds demo data, spawns the
//! reminder loop as a background task, and runs the HTTP gateway until
//! a shutdown signal arrives.

use oncall_config::OncallConfig;
use oncall_core::OncallError;
use oncall_gateway::{start_server, GatewayState, ServerConfig};
use oncall_storage::{seed, Database};
use tracing::{debug, info};

/// Runs the `oncall serve` command.
pub async fn run_serve(config: OncallConfig) -> Result<(), OncallError> {
    init_tracing(&config.server.log_level);

    info!("starting oncall serve");

    let db = Database::open(&config.storage.database_path).await?;
    info!(
        path = config.storage.database_path.as_str(),
        "database opened"
    );

    if config.seed.on_startup {
        if seed::seed_demo_data(&db).await? {
            info!("demo data seeded");
        } else {
            debug!("seed skipped (people already exist)");
        }
    }

    // The reminder loop runs beside the gateway. With no channels
    // configured each sweep is a no-op.
    {
        let reminder_db = db.clone();
        let notify_config = config.notify.clone();
        tokio::spawn(async move {
            oncall_notify::reminder::run_reminder_loop(reminder_db, notify_config).await;
        });
        info!(
            interval_secs = config.notify.check_interval_secs,
            "reminder loop started"
        );
    }

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let state = GatewayState::new(db);

    tokio::select! {
        result = start_server(&server_config, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    info!("oncall serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("oncall={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
