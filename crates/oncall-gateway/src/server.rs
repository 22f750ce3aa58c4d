// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use axum::{
    routing::{get, post},
    Router,
};
use oncall_core::OncallError;
use oncall_storage::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Single-writer database handle.
    pub db: Database,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors ServerConfig from oncall-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full route tree. Exposed separately so tests can drive the
/// router without binding a socket.
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(
            "/v1/schedules/teams/{team_id}/generate",
            post(handlers::generate_schedule),
        )
        .route(
            "/v1/schedules/teams/{team_id}/oncall-now",
            get(handlers::oncall_now_for_team),
        )
        .route(
            "/v1/schedules/teams/{team_id}",
            get(handlers::get_team_schedule),
        )
        .route(
            "/v1/schedules/{id}",
            get(handlers::get_schedule).delete(handlers::delete_schedule),
        )
        .route("/v1/schedules/{id}/override", post(handlers::override_slot))
        .route(
            "/v1/schedules/{id}/oncall-now",
            get(handlers::oncall_now_for_schedule),
        )
        .route("/v1/schedules/{id}/export", get(handlers::export_schedule))
        .route("/v1/people", get(handlers::list_people))
        .route("/v1/teams", get(handlers::list_teams))
        .route("/v1/pto", post(handlers::create_pto).get(handlers::list_pto))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), OncallError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OncallError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| OncallError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
