// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `config` table: one JSON value per key.

use lookout_core::{ConfigKey, LookoutError};
use rusqlite::{params, OptionalExtension};

use crate::database::{map_tr_err, Database};

/// Raw JSON stored under `key`, if any.
pub async fn get(db: &Database, key: ConfigKey) -> Result<Option<String>, LookoutError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM config WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace the JSON stored under `key`.
pub async fn put(db: &Database, key: ConfigKey, value: String) -> Result<(), LookoutError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO config (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
