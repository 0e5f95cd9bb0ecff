// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seen` table: ids the operator has already been alerted about.

use lookout_core::{LookoutError, SeenRecord};
use rusqlite::{params, OptionalExtension};

use crate::database::{map_tr_err, Database};

pub async fn get(db: &Database, id: &str) -> Result<Option<SeenRecord>, LookoutError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, ts FROM seen WHERE id = ?1",
                params![id],
                |row| Ok(SeenRecord::new(row.get::<_, String>(0)?, row.get(1)?)),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert, or refresh `ts` of an existing record.
pub async fn put(db: &Database, record: &SeenRecord) -> Result<(), LookoutError> {
    let SeenRecord { id, ts } = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO seen (id, ts) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET ts = excluded.ts",
                params![id, ts],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn all(db: &Database) -> Result<Vec<SeenRecord>, LookoutError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, ts FROM seen ORDER BY ts ASC, id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(SeenRecord::new(row.get::<_, String>(0)?, row.get(1)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

/// Deleting an absent id is not an error.
pub async fn delete(db: &Database, id: &str) -> Result<(), LookoutError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM seen WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
