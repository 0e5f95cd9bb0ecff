// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations.
//!
//! `V1` creates `config` and `seen`, `V2` adds `queue`. Refinery records
//! applied versions in `refinery_schema_history`, so a new version file only
//! adds to an existing database.

use lookout_core::LookoutError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply every pending migration.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), LookoutError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(LookoutError::store)?;
    for migration in report.applied_migrations() {
        tracing::info!(version = migration.version(), name = migration.name(), "applied migration");
    }
    Ok(())
}

/// Highest applied schema version, or 0 on a fresh database.
pub fn schema_version(conn: &rusqlite::Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM refinery_schema_history",
        [],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_reach_latest_version_and_are_idempotent() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 2);

        conn.execute("INSERT INTO config (key, value) VALUES ('k', '1')", [])
            .unwrap();
        run_migrations(&mut conn).unwrap();

        let value: String = conn
            .query_row("SELECT value FROM config WHERE key = 'k'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(value, "1");
    }
}
