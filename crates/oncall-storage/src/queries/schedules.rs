// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule definition and slot persistence.
//!
//! A schedule definition and its slots are written in one transaction;
//! a failed generation leaves no partial rows behind. Overrides are a
//! read-merge-write on a single slot, also transactional.

use chrono::NaiveDate;
use oncall_core::OncallError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{
    EnrichedSlot, OnCallSlot, ScheduleDefinition, ScheduleId, SlotAssignment, SlotOverride, TeamId,
};

fn definition_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScheduleDefinition> {
    Ok(ScheduleDefinition {
        id: row.get(0)?,
        team_id: row.get(1)?,
        year: row.get(2)?,
        rotation_days: row.get(3)?,
        week_starts_on: row.get(4)?,
        custom_start_date: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn slot_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OnCallSlot> {
    Ok(OnCallSlot {
        schedule_id: row.get(0)?,
        slot: row.get(1)?,
        start: row.get(2)?,
        end: row.get(3)?,
        primary_person_id: row.get(4)?,
        secondary_person_id: row.get(5)?,
        notes: row.get(6)?,
        reminded: row.get(7)?,
    })
}

const SLOT_COLUMNS: &str = "schedule_id, slot, start_date, end_date,
     primary_person_id, secondary_person_id, notes, reminded";

/// Persist a schedule definition and its generated slots atomically.
///
/// Returns the stored definition with its assigned id.
pub async fn create_schedule(
    db: &Database,
    team_id: TeamId,
    year: i32,
    rotation_days: i64,
    week_starts_on: u8,
    custom_start_date: Option<NaiveDate>,
    assignments: &[SlotAssignment],
) -> Result<ScheduleDefinition, OncallError> {
    let assignments = assignments.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO schedule_definitions
                     (team_id, year, rotation_days, week_starts_on, custom_start_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![team_id, year, rotation_days, week_starts_on, custom_start_date],
            )?;
            let schedule_id = tx.last_insert_rowid();

            for a in &assignments {
                tx.execute(
                    "INSERT INTO oncall_slots
                         (schedule_id, slot, start_date, end_date,
                          primary_person_id, secondary_person_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        schedule_id,
                        a.slot,
                        a.start,
                        a.end,
                        a.primary_person_id,
                        a.secondary_person_id,
                    ],
                )?;
            }

            let definition = tx.query_row(
                "SELECT id, team_id, year, rotation_days, week_starts_on,
                        custom_start_date, created_at
                 FROM schedule_definitions WHERE id = ?1",
                params![schedule_id],
                definition_from_row,
            )?;
            tx.commit()?;
            Ok(definition)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a schedule definition by id.
pub async fn get_schedule(
    db: &Database,
    id: ScheduleId,
) -> Result<Option<ScheduleDefinition>, OncallError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, team_id, year, rotation_days, week_starts_on,
                        custom_start_date, created_at
                 FROM schedule_definitions WHERE id = ?1",
                params![id],
                definition_from_row,
            );
            match result {
                Ok(def) => Ok(Some(def)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List schedule definitions for a team, optionally restricted to a year.
/// Most recently created first.
pub async fn list_schedules_for_team(
    db: &Database,
    team_id: TeamId,
    year: Option<i32>,
) -> Result<Vec<ScheduleDefinition>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut schedules = Vec::new();
            match year {
                Some(y) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, team_id, year, rotation_days, week_starts_on,
                                custom_start_date, created_at
                         FROM schedule_definitions
                         WHERE team_id = ?1 AND year = ?2
                         ORDER BY created_at DESC, id DESC",
                    )?;
                    let rows = stmt.query_map(params![team_id, y], definition_from_row)?;
                    for row in rows {
                        schedules.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, team_id, year, rotation_days, week_starts_on,
                                custom_start_date, created_at
                         FROM schedule_definitions
                         WHERE team_id = ?1
                         ORDER BY created_at DESC, id DESC",
                    )?;
                    let rows = stmt.query_map(params![team_id], definition_from_row)?;
                    for row in rows {
                        schedules.push(row?);
                    }
                }
            }
            Ok(schedules)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most recently created schedule for a team and year, if any.
pub async fn latest_schedule_for_team_year(
    db: &Database,
    team_id: TeamId,
    year: i32,
) -> Result<Option<ScheduleDefinition>, OncallError> {
    let mut schedules = list_schedules_for_team(db, team_id, Some(year)).await?;
    Ok(if schedules.is_empty() {
        None
    } else {
        Some(schedules.remove(0))
    })
}

/// Delete a schedule and its slots. Returns `false` if no such schedule
/// existed.
pub async fn delete_schedule(db: &Database, id: ScheduleId) -> Result<bool, OncallError> {
    db.connection()
        .call(move |conn| {
            // ON DELETE CASCADE removes the slots.
            let n = conn.execute("DELETE FROM schedule_definitions WHERE id = ?1", params![id])?;
            Ok(n > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All slots of a schedule, ordered by slot number.
pub async fn get_slots(
    db: &Database,
    schedule_id: ScheduleId,
) -> Result<Vec<OnCallSlot>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SLOT_COLUMNS} FROM oncall_slots WHERE schedule_id = ?1 ORDER BY slot"
            ))?;
            let rows = stmt.query_map(params![schedule_id], slot_from_row)?;
            let mut slots = Vec::new();
            for row in rows {
                slots.push(row?);
            }
            Ok(slots)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Merge an override into one slot inside a transaction.
///
/// Returns the updated slot, or `None` if the slot does not exist. An
/// override may point primary and secondary at the same person; the caller
/// decides whether the referenced people exist.
pub async fn apply_override(
    db: &Database,
    schedule_id: ScheduleId,
    slot: i64,
    patch: &SlotOverride,
) -> Result<Option<OnCallSlot>, OncallError> {
    let patch = patch.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let result = tx.query_row(
                &format!(
                    "SELECT {SLOT_COLUMNS} FROM oncall_slots
                     WHERE schedule_id = ?1 AND slot = ?2"
                ),
                params![schedule_id, slot],
                slot_from_row,
            );
            let mut stored = match result {
                Ok(s) => s,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(e.into()),
            };

            patch.apply_to(&mut stored);

            tx.execute(
                "UPDATE oncall_slots
                 SET primary_person_id = ?1, secondary_person_id = ?2, notes = ?3
                 WHERE schedule_id = ?4 AND slot = ?5",
                params![
                    stored.primary_person_id,
                    stored.secondary_person_id,
                    stored.notes,
                    schedule_id,
                    slot,
                ],
            )?;
            tx.commit()?;
            Ok(Some(stored))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Slots joined with assignee display data, for exports.
pub async fn get_slots_with_people(
    db: &Database,
    schedule_id: ScheduleId,
) -> Result<Vec<EnrichedSlot>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT s.slot, s.start_date, s.end_date,
                        s.primary_person_id, p1.name, p1.email,
                        s.secondary_person_id, p2.name, p2.email,
                        s.notes
                 FROM oncall_slots s
                 LEFT JOIN people p1 ON p1.id = s.primary_person_id
                 LEFT JOIN people p2 ON p2.id = s.secondary_person_id
                 WHERE s.schedule_id = ?1
                 ORDER BY s.slot",
            )?;
            let rows = stmt.query_map(params![schedule_id], |row| {
                Ok(EnrichedSlot {
                    slot: row.get(0)?,
                    start: row.get(1)?,
                    end: row.get(2)?,
                    primary_person_id: row.get(3)?,
                    primary_name: row.get(4)?,
                    primary_email: row.get(5)?,
                    secondary_person_id: row.get(6)?,
                    secondary_name: row.get(7)?,
                    secondary_email: row.get(8)?,
                    notes: row.get(9)?,
                })
            })?;
            let mut slots = Vec::new();
            for row in rows {
                slots.push(row?);
            }
            Ok(slots)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The slot of one schedule whose inclusive date range covers `date`.
pub async fn slot_covering_date(
    db: &Database,
    schedule_id: ScheduleId,
    date: NaiveDate,
) -> Result<Option<OnCallSlot>, OncallError> {
    db.connection()
        .call(move |conn| {
            // ISO dates compare correctly as text.
            let result = conn.query_row(
                &format!(
                    "SELECT {SLOT_COLUMNS} FROM oncall_slots
                     WHERE schedule_id = ?1 AND start_date <= ?2 AND end_date >= ?2"
                ),
                params![schedule_id, date],
                slot_from_row,
            );
            match result {
                Ok(s) => Ok(Some(s)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Slots starting exactly on `date` whose reminder has not been sent.
pub async fn unreminded_slots_starting_on(
    db: &Database,
    date: NaiveDate,
) -> Result<Vec<OnCallSlot>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SLOT_COLUMNS} FROM oncall_slots
                 WHERE start_date = ?1 AND reminded = 0
                 ORDER BY schedule_id, slot"
            ))?;
            let rows = stmt.query_map(params![date], slot_from_row)?;
            let mut slots = Vec::new();
            for row in rows {
                slots.push(row?);
            }
            Ok(slots)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a slot's reminder as delivered.
pub async fn mark_reminded(
    db: &Database,
    schedule_id: ScheduleId,
    slot: i64,
) -> Result<(), OncallError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE oncall_slots SET reminded = 1 WHERE schedule_id = ?1 AND slot = ?2",
                params![schedule_id, slot],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
