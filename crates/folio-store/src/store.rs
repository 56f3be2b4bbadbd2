use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use folio_core::PreferenceStore;

use crate::error::{Result, StoreError};
use crate::paths::data_dir;
use crate::schema;

/// File name of the preference database inside the data directory.
pub const DB_FILE: &str = "prefs.db";

/// SQLite-backed preference store.
pub struct PrefStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl PrefStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        tracing::debug!("opened preference store at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open `prefs.db` under the configured data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(&data_dir().join(DB_FILE))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_pref(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_pref(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// Returns true when a value was removed.
    pub fn remove_pref(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1", [key])?;
        Ok(rows > 0)
    }

    /// Every stored preference, ordered by key.
    pub fn all_prefs(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM preferences ORDER BY key")?;
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    pub fn checkpoint_truncate(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

impl PreferenceStore for PrefStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.get_pref(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("failed to read preference '{key}': {e}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.set_pref(key, value) {
            tracing::warn!("failed to persist preference '{key}': {e}");
        }
    }
}

impl Drop for PrefStore {
    fn drop(&mut self) {
        if self.path.is_some() {
            let _ = self.checkpoint_truncate();
        }
    }
}
