// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leave period persistence and index construction.

use chrono::NaiveDate;
use oncall_core::{OncallError, PtoIndex};
use rusqlite::params;

use crate::database::Database;
use crate::models::{PersonId, PtoPeriod, TeamId};

fn period_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PtoPeriod> {
    Ok(PtoPeriod {
        id: row.get(0)?,
        person_id: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        reason: row.get(4)?,
    })
}

/// Record a leave period, returning its assigned id.
pub async fn create_pto(
    db: &Database,
    person_id: PersonId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<&str>,
) -> Result<i64, OncallError> {
    if end_date < start_date {
        return Err(OncallError::InvalidInput(format!(
            "leave period ends ({end_date}) before it starts ({start_date})"
        )));
    }
    let reason = reason.map(|s| s.to_string());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO pto (person_id, start_date, end_date, reason)
                 VALUES (?1, ?2, ?3, ?4)",
                params![person_id, start_date, end_date, reason],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List leave periods, optionally filtered by person.
pub async fn list_pto(
    db: &Database,
    person_id: Option<PersonId>,
) -> Result<Vec<PtoPeriod>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut periods = Vec::new();
            match person_id {
                Some(pid) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, person_id, start_date, end_date, reason
                         FROM pto WHERE person_id = ?1 ORDER BY start_date",
                    )?;
                    let rows = stmt.query_map(params![pid], period_from_row)?;
                    for row in rows {
                        periods.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, person_id, start_date, end_date, reason
                         FROM pto ORDER BY start_date",
                    )?;
                    let rows = stmt.query_map([], period_from_row)?;
                    for row in rows {
                        periods.push(row?);
                    }
                }
            }
            Ok(periods)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Build the leave index for a team's roster in one year.
///
/// Only periods belonging to current roster members contribute; the index
/// clips each period to the year.
pub async fn pto_index_for_team_year(
    db: &Database,
    team_id: TeamId,
    year: i32,
) -> Result<PtoIndex, OncallError> {
    let periods: Vec<PtoPeriod> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT p.id, p.person_id, p.start_date, p.end_date, p.reason
                 FROM pto p
                 JOIN team_memberships m ON m.person_id = p.person_id
                 WHERE m.team_id = ?1",
            )?;
            let rows = stmt.query_map(params![team_id], period_from_row)?;
            let mut periods = Vec::new();
            for row in rows {
                periods.push(row?);
            }
            Ok(periods)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    Ok(PtoIndex::from_periods(&periods, year))
}
