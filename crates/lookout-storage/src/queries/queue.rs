// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `queue` table: writes captured while offline.
//!
//! Payloads are stored as JSON text; decoding happens in the store adapter so
//! a single bad row cannot fail a whole read.

use lookout_core::LookoutError;
use rusqlite::{params, OptionalExtension};

use crate::database::{map_tr_err, Database};

/// A queue row with its payload still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQueueRow {
    pub id: i64,
    pub payload: String,
    pub ts: i64,
}

/// Append a payload. Returns the assigned id.
pub async fn enqueue(db: &Database, payload: String, ts: i64) -> Result<i64, LookoutError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO queue (payload, ts) VALUES (?1, ?2)",
                params![payload, ts],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get(db: &Database, id: i64) -> Result<Option<RawQueueRow>, LookoutError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, payload, ts FROM queue WHERE id = ?1",
                params![id],
                |row| {
                    Ok(RawQueueRow {
                        id: row.get(0)?,
                        payload: row.get(1)?,
                        ts: row.get(2)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Every row in id order.
pub async fn all(db: &Database) -> Result<Vec<RawQueueRow>, LookoutError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, payload, ts FROM queue ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(RawQueueRow {
                    id: row.get(0)?,
                    payload: row.get(1)?,
                    ts: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn delete(db: &Database, id: i64) -> Result<(), LookoutError> {
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM queue WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
