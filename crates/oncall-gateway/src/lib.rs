// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the oncall scheduler, built on axum.
//!
//! The gateway is a thin orchestration layer: handlers resolve rosters and
//! leave data from storage, call the pure generator in `oncall-core`, and
//! persist results. No scheduling decisions are made here.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, GatewayState, ServerConfig};
