// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Team and roster operations.
//!
//! Roster order is person id ascending; the generator's round-robin walks
//! the roster in that order.

use oncall_core::OncallError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{PersonId, Team, TeamId};

/// Create a team, returning its assigned id.
pub async fn create_team(
    db: &Database,
    name: &str,
    description: Option<&str>,
) -> Result<TeamId, OncallError> {
    let name = name.to_string();
    let description = description.map(|s| s.to_string());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO teams (name, description) VALUES (?1, ?2)",
                params![name, description],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Add a person to a team roster. Inserting an existing membership is a
/// no-op.
pub async fn add_member(
    db: &Database,
    team_id: TeamId,
    person_id: PersonId,
) -> Result<(), OncallError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO team_memberships (team_id, person_id) VALUES (?1, ?2)",
                params![team_id, person_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a team with its roster, or `None` if no such team exists.
pub async fn get_team(db: &Database, id: TeamId) -> Result<Option<Team>, OncallError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT id, name, description FROM teams WHERE id = ?1")?;
            let result = stmt.query_row(params![id], |row| {
                Ok((row.get::<_, TeamId>(0)?, row.get(1)?, row.get(2)?))
            });
            let (team_id, name, description) = match result {
                Ok(t) => t,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(e.into()),
            };

            let member_ids = roster_ids(conn, team_id)?;
            Ok(Some(Team {
                id: team_id,
                name,
                description,
                member_ids,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all teams with their rosters, ordered by id.
pub async fn list_teams(db: &Database) -> Result<Vec<Team>, OncallError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, description FROM teams ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, TeamId>(0)?, row.get(1)?, row.get(2)?))
            })?;

            let mut bare: Vec<(TeamId, String, Option<String>)> = Vec::new();
            for row in rows {
                bare.push(row?);
            }

            let mut teams = Vec::new();
            for (id, name, description) in bare {
                let member_ids = roster_ids(conn, id)?;
                teams.push(Team {
                    id,
                    name,
                    description,
                    member_ids,
                });
            }
            Ok(teams)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Roster person ids for a team, ordered by person id.
fn roster_ids(conn: &rusqlite::Connection, team_id: TeamId) -> rusqlite::Result<Vec<PersonId>> {
    let mut stmt = conn.prepare(
        "SELECT person_id FROM team_memberships WHERE team_id = ?1 ORDER BY person_id",
    )?;
    let rows = stmt.query_map(params![team_id], |row| row.get(0))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::people::create_person;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_get_team_with_roster() {
        let (db, _dir) = setup_db().await;
        let alice = create_person(&db, "Alice", None, None).await.unwrap();
        let bob = create_person(&db, "Bob", None, None).await.unwrap();
        let team_id = create_team(&db, "Platform", Some("infra rotation"))
            .await
            .unwrap();

        // Insert out of id order; the roster must come back sorted.
        add_member(&db, team_id, bob).await.unwrap();
        add_member(&db, team_id, alice).await.unwrap();

        let team = get_team(&db, team_id).await.unwrap().unwrap();
        assert_eq!(team.name, "Platform");
        assert_eq!(team.description.as_deref(), Some("infra rotation"));
        assert_eq!(team.member_ids, vec![alice, bob]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_membership_is_a_noop() {
        let (db, _dir) = setup_db().await;
        let alice = create_person(&db, "Alice", None, None).await.unwrap();
        let team_id = create_team(&db, "Platform", None).await.unwrap();

        add_member(&db, team_id, alice).await.unwrap();
        add_member(&db, team_id, alice).await.unwrap();

        let team = get_team(&db, team_id).await.unwrap().unwrap();
        assert_eq!(team.member_ids, vec![alice]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_nonexistent_team_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_team(&db, 42).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_teams_includes_rosters() {
        let (db, _dir) = setup_db().await;
        let alice = create_person(&db, "Alice", None, None).await.unwrap();
        let t1 = create_team(&db, "Platform", None).await.unwrap();
        let _t2 = create_team(&db, "Payments", None).await.unwrap();
        add_member(&db, t1, alice).await.unwrap();

        let teams = list_teams(&db).await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].member_ids, vec![alice]);
        assert!(teams[1].member_ids.is_empty());

        db.close().await.unwrap();
    }
}
