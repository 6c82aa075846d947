//! SQLite-backed photo library.
//!
//! Photos are private to the device: raw bytes in a single `photos` table
//! keyed by a free-form id, opened once per process and reused. Unlike the
//! progress file, failures here surface to the caller; the UI decides how to
//! degrade ("image not found").

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CoreError, StoreError};

#[derive(Debug, Clone)]
pub struct PhotoRecord {
    pub id: String,
    pub bytes: Vec<u8>,
}

/// Injectable photo store. `put` is an upsert; `id` is the primary key.
pub trait PhotoStore {
    fn put(&mut self, id: &str, bytes: &[u8]) -> Result<(), StoreError>;

    fn get(&self, id: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn get_all(&self) -> Result<Vec<PhotoRecord>, StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// SQLite database at `<data_dir>/photos.db`.
pub struct PhotoDb {
    conn: Connection,
}

impl PhotoDb {
    pub fn open_default() -> Result<Self, CoreError> {
        let path = super::data_dir()?.join("photos.db");
        Ok(Self::open(&path)?)
    }

    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS photos (
                id       TEXT PRIMARY KEY,
                bytes    BLOB NOT NULL,
                added_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl PhotoStore for PhotoDb {
    fn put(&mut self, id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO photos (id, bytes, added_at) VALUES (?1, ?2, ?3)",
            params![id, bytes, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let bytes = self
            .conn
            .query_row("SELECT bytes FROM photos WHERE id = ?1", params![id], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(bytes)
    }

    fn get_all(&self) -> Result<Vec<PhotoRecord>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, bytes FROM photos ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(PhotoRecord {
                id: row.get(0)?,
                bytes: row.get(1)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM photos WHERE id = ?1", params![id])?;
        Ok(())
    }
}

/// In-memory store for tests and degraded fallback.
#[derive(Default)]
pub struct MemoryPhotoStore {
    map: std::collections::BTreeMap<String, Vec<u8>>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhotoStore for MemoryPhotoStore {
    fn put(&mut self, id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.map.insert(id.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.map.get(id).cloned())
    }

    fn get_all(&self) -> Result<Vec<PhotoRecord>, StoreError> {
        Ok(self
            .map
            .iter()
            .map(|(id, bytes)| PhotoRecord {
                id: id.clone(),
                bytes: bytes.clone(),
            })
            .collect())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.map.remove(id);
        Ok(())
    }
}
