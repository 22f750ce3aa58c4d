// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query operations over the single database connection.

pub mod people;
pub mod pto;
pub mod schedules;
pub mod teams;
