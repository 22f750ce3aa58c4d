// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage model types.
//!
//! The row shapes are the domain types from `oncall-core`; this module
//! re-exports them so query modules and downstream crates import from one
//! place.

pub use oncall_core::types::{
    EnrichedSlot, OnCallNow, OnCallSlot, Person, PersonId, PtoPeriod, ScheduleDefinition,
    ScheduleId, SlotAssignment, SlotOverride, Team, TeamId,
};
