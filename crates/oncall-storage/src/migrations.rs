// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema migrations, embedded at build time with refinery and applied
//! whenever a database is opened. Refinery records what has already run
//! in its `refinery_schema_history` table, so reopening is a no-op.

use oncall_core::OncallError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply any pending migrations on the given connection.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), OncallError> {
    embedded::migrations::runner()
        .run(conn)
        .map(|_| ())
        .map_err(|e| OncallError::Storage { source: Box::new(e) })
}
