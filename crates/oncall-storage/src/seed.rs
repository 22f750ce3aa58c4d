// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Idempotent demo-data seed.
//!
//! Creates a small roster, a default team, and a generated weekly rotation
//! for the current year. A database that already holds any people is left
//! untouched, so the seed is safe to run on every startup.

use chrono::{Datelike, Utc};
use oncall_core::{generate_slots, OncallError, PtoIndex};
use tracing::info;

use crate::database::Database;
use crate::queries::{people, schedules, teams};

const DEMO_PEOPLE: &[(&str, &str)] = &[
    ("Alice Johnson", "alice@example.com"),
    ("Bob Martinez", "bob@example.com"),
    ("Carol White", "carol@example.com"),
    ("David Kim", "david@example.com"),
    ("Erin Patel", "erin@example.com"),
    ("Frank Novak", "frank@example.com"),
];

const DEMO_TEAM: &str = "Default On-call Team";

/// Seed demo data unless the database already contains people.
///
/// Returns `true` when data was written.
pub async fn seed_demo_data(db: &Database) -> Result<bool, OncallError> {
    if people::count_people(db).await? > 0 {
        info!("seed skipped, people already present");
        return Ok(false);
    }

    let mut roster = Vec::with_capacity(DEMO_PEOPLE.len());
    for (name, email) in DEMO_PEOPLE {
        let id = people::create_person(db, name, Some(email), None).await?;
        roster.push(id);
    }

    let team_id = teams::create_team(db, DEMO_TEAM, Some("Seeded demo rotation")).await?;
    for person_id in &roster {
        teams::add_member(db, team_id, *person_id).await?;
    }

    // Weekly rotation starting on Mondays, no leave recorded yet.
    let year = Utc::now().year();
    let assignments = generate_slots(&roster, year, 7, 0, None, &PtoIndex::new(), true)?;
    let definition =
        schedules::create_schedule(db, team_id, year, 7, 0, None, &assignments).await?;

    info!(
        team_id,
        schedule_id = definition.id,
        slots = assignments.len(),
        "seeded demo roster and schedule"
    );
    Ok(true)
}
