// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the oncall scheduler.
//!
//! This crate holds the pure, deterministic heart of the system: the
//! leave-aware round-robin slot generator, the per-person leave index, the
//! slot override merge semantics, and the schedule export serializers.
//! Nothing here performs I/O, logging, or clock reads -- persistence and
//! HTTP live in the sibling crates and hand this crate already-resolved
//! in-memory data.

pub mod error;
pub mod export;
pub mod overrides;
pub mod pto;
pub mod rotation;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OncallError;
pub use export::ExportFormat;
pub use pto::PtoIndex;
pub use rotation::{first_rotation_start, generate_slots};
pub use types::{
    EnrichedSlot, OnCallNow, OnCallSlot, Person, PersonId, PtoPeriod, ScheduleDefinition,
    ScheduleId, SlotAssignment, SlotOverride, Team, TeamId,
};
