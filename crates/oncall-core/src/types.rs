// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the oncall workspace.
//!
//! Identifiers are plain `i64` row ids, matching the storage layer. Dates
//! are `chrono::NaiveDate` (calendar days, no time zone) and timestamps are
//! UTC.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a person.
pub type PersonId = i64;
/// Identifier of a team.
pub type TeamId = i64;
/// Identifier of a schedule definition.
pub type ScheduleId = i64;

/// A person eligible for rotation. Display data only; the core never
/// creates or mutates people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
    pub time_zone: Option<String>,
}

/// A team owning schedules. Display data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub description: Option<String>,
    /// Member person ids, in roster order.
    pub member_ids: Vec<PersonId>,
}

/// A leave (blackout) period during which a person should not be assigned
/// as primary. Inclusive on both ends; periods may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtoPeriod {
    pub id: i64,
    pub person_id: PersonId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

/// Generation parameters for one schedule, persisted alongside its slots.
///
/// Immutable once created except by deletion. A team+year may accumulate
/// several definitions over time; the most recently created one is
/// authoritative for "current" queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    pub id: ScheduleId,
    pub team_id: TeamId,
    pub year: i32,
    pub rotation_days: i64,
    /// Weekday the first slot starts on when no custom start date is given.
    /// Monday = 0 through Sunday = 6.
    pub week_starts_on: u8,
    pub custom_start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// One assignment produced by the generator, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// 1-based slot number, unique within the schedule.
    pub slot: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub primary_person_id: PersonId,
    pub secondary_person_id: Option<PersonId>,
}

/// A persisted on-call slot. Slots are contiguous, non-overlapping, and
/// collectively cover the schedule's effective start through Dec 31.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallSlot {
    pub schedule_id: ScheduleId,
    pub slot: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub primary_person_id: PersonId,
    pub secondary_person_id: Option<PersonId>,
    pub notes: Option<String>,
    /// Set once an upcoming-rotation reminder has been delivered.
    pub reminded: bool,
}

/// Partial update for one slot. Absent fields leave the stored value
/// untouched; this is a merge, not a replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOverride {
    pub primary_person_id: Option<PersonId>,
    pub secondary_person_id: Option<PersonId>,
    pub notes: Option<String>,
}

/// A slot joined with the display data of its assignees, composed for
/// exports and notifications. Immutable; the stored slot is never mutated
/// to carry display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedSlot {
    pub slot: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub primary_person_id: PersonId,
    pub primary_name: Option<String>,
    pub primary_email: Option<String>,
    pub secondary_person_id: Option<PersonId>,
    pub secondary_name: Option<String>,
    pub secondary_email: Option<String>,
    pub notes: Option<String>,
}

/// Composite result of a temporal ("who is on call now") query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallNow {
    pub schedule: ScheduleDefinition,
    pub slot: OnCallSlot,
    pub primary: Person,
    pub secondary: Option<Person>,
}
