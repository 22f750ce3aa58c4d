// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the oncall scheduler.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed operations for people,
//! teams, leave periods, and generated schedules.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

pub use database::Database;
pub use models::*;
