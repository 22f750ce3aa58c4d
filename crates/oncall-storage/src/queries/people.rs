// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Person CRUD operations.

use oncall_core::OncallError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Person, PersonId};

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        time_zone: row.get(3)?,
    })
}

/// Create a person, returning their assigned id.
pub async fn create_person(
    db: &Database,
    name: &str,
    email: Option<&str>,
    time_zone: Option<&str>,
) -> Result<PersonId, OncallError> {
    let name = name.to_string();
    let email = email.map(|s| s.to_string());
    let time_zone = time_zone.map(|s| s.to_string());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO people (name, email, time_zone) VALUES (?1, ?2, ?3)",
                params![name, email, time_zone],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a person by id.
pub async fn get_person(db: &Database, id: PersonId) -> Result<Option<Person>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, email, time_zone FROM people WHERE id = ?1")?;
            let result = stmt.query_row(params![id], person_from_row);
            match result {
                Ok(person) => Ok(Some(person)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all people, ordered by id.
pub async fn list_people(db: &Database) -> Result<Vec<Person>, OncallError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, email, time_zone FROM people ORDER BY id")?;
            let rows = stmt.query_map([], person_from_row)?;
            let mut people = Vec::new();
            for row in rows {
                people.push(row?);
            }
            Ok(people)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count all people. Used by the seed to stay idempotent.
pub async fn count_people(db: &Database) -> Result<i64, OncallError> {
    db.connection()
        .call(|conn| {
            let n = conn.query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))?;
            Ok(n)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
