//! Namespaced string preferences.
//!
//! A small key-value store addressed by `(namespace, key)`. The on-disk
//! implementation is a single SQLite table; tests use [`MemoryPrefs`].

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;

const PREFS_FILE: &str = "prefs.db";

/// String preference storage.
pub trait PrefsStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get_string(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn put_string(&mut self, namespace: &str, key: &str, value: &str)
        -> Result<(), StorageError>;
}

/// SQLite-backed preferences.
pub struct SqlitePrefs {
    conn: Connection,
}

impl SqlitePrefs {
    /// Open the preference database at `<data_dir>/prefs.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join(PREFS_FILE))
    }

    /// Open a preference database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let prefs = Self { conn };
        prefs.migrate()?;
        Ok(prefs)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let prefs = Self { conn };
        prefs.migrate()?;
        Ok(prefs)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS prefs (
                namespace TEXT NOT NULL,
                key       TEXT NOT NULL,
                value     TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            );",
        )
    }
}

impl PrefsStore for SqlitePrefs {
    fn get_string(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM prefs WHERE namespace = ?1 AND key = ?2")?;
        let result = stmt.query_row(params![namespace, key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_string(
        &mut self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO prefs (namespace, key, value) VALUES (?1, ?2, ?3)",
            params![namespace, key, value],
        )?;
        Ok(())
    }
}

/// In-memory preferences.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: HashMap<(String, String), String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryPrefs {
    fn get_string(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .values
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn put_string(
        &mut self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        self.values
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }
}

impl<P: PrefsStore + ?Sized> PrefsStore for &mut P {
    fn get_string(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_string(namespace, key)
    }

    fn put_string(
        &mut self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        (**self).put_string(namespace, key, value)
    }
}
