//! Local key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Provide a named-slot read/overwrite API for snapshot blobs.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write` replaces the whole value stored under a key.
//! - Blank keys are rejected before touching storage.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type KvResult<T> = Result<T, KvError>;

/// Error for key-value slot reads and writes.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    InvalidKey,
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey => write!(f, "storage key must not be blank"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-slot storage used for snapshot persistence.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> KvResult<Option<Vec<u8>>>;
    fn write(&self, key: &str, value: &[u8]) -> KvResult<()>;
}

/// SQLite-backed key-value storage over the `kv_entries` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db` or `open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn read(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        ensure_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &[u8]) -> KvResult<()> {
        ensure_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process key-value storage.
///
/// Counts write attempts and can be told to reject writes, which makes the
/// store's best-effort persistence observable.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
    write_attempts: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates one slot.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.borrow_mut().insert(key.into(), value.into());
        self
    }

    /// Number of `write` calls so far, failed ones included.
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.get()
    }

    /// Makes subsequent writes fail with `KvError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        ensure_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> KvResult<()> {
        ensure_key(key)?;
        self.write_attempts.set(self.write_attempts.get() + 1);
        if self.fail_writes.get() {
            return Err(KvError::Unavailable("writes disabled".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

fn ensure_key(key: &str) -> KvResult<()> {
    if key.trim().is_empty() {
        return Err(KvError::InvalidKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, KvError, MemoryKeyValueStore};

    #[test]
    fn memory_store_counts_failed_writes() {
        let storage = MemoryKeyValueStore::new();
        storage.set_fail_writes(true);

        let err = storage.write("slot", b"[]").unwrap_err();
        assert!(matches!(err, KvError::Unavailable(_)));
        assert_eq!(storage.write_attempts(), 1);
        assert!(storage.read("slot").unwrap().is_none());
    }

    #[test]
    fn blank_key_is_rejected() {
        let storage = MemoryKeyValueStore::new();
        assert!(matches!(storage.read("  "), Err(KvError::InvalidKey)));
        assert!(matches!(storage.write("", b"x"), Err(KvError::InvalidKey)));
    }
}
