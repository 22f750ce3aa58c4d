// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the oncall scheduler.

use thiserror::Error;

/// The primary error type used across the oncall workspace.
#[derive(Debug, Error)]
pub enum OncallError {
    /// Rejected request input (empty roster, non-positive rotation length,
    /// malformed date ranges, unknown export format).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No schedule with the given identifier exists.
    #[error("schedule {schedule_id} not found")]
    ScheduleNotFound { schedule_id: i64 },

    /// No slot with the given number exists in the schedule.
    #[error("slot {slot} not found in schedule {schedule_id}")]
    SlotNotFound { schedule_id: i64, slot: i64 },

    /// No team with the given identifier exists.
    #[error("team {team_id} not found")]
    TeamNotFound { team_id: i64 },

    /// No person with the given identifier exists.
    #[error("person {person_id} not found")]
    PersonNotFound { person_id: i64 },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Notification delivery errors (SMTP, webhook). Logged by the host,
    /// never fatal to scheduling operations.
    #[error("notification error: {message}")]
    Notify {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OncallError {
    /// Whether this error is one of the not-found family. Hosts map these
    /// to a "nothing to show" response rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ScheduleNotFound { .. }
                | Self::SlotNotFound { .. }
                | Self::TeamNotFound { .. }
                | Self::PersonNotFound { .. }
        )
    }
}
