//! SQLite-backed blob store.
//!
//! # Invariants
//! - One row per collection in `collections`, upserted on every save.
//! - The connection handed in must already be migrated (`db::open_db*`).

use super::{Collection, Store, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Collection store over a migrated SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a fresh in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn put(&mut self, collection: Collection, payload: &str) -> StoreResult<()> {
        let result = self.conn.execute(
            "INSERT INTO collections (name, payload)
             VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![collection.key(), payload],
        );
        if let Err(err) = result {
            error!(
                "event=collection_save module=store status=error collection={} error={}",
                collection, err
            );
            return Err(err.into());
        }
        Ok(())
    }

    fn get(&self, collection: Collection) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?1;",
                [collection.key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }
}
