//! Durable record of which days' minigames have been completed.
//!
//! The whole mapping lives in a single JSON document written atomically
//! (temp file + rename). A missing or corrupt document is an empty mapping,
//! never an error; the app only ever adds to it.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::days::DayKey;
use crate::error::{CoreError, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub completed: bool,
    pub completed_at: DateTime<Utc>,
}

pub type ProgressMap = BTreeMap<DayKey, ProgressRecord>;

/// Injectable completion store. Single user, last write wins.
pub trait ProgressStore {
    /// Idempotent: repeated calls keep `completed` true and refresh the
    /// timestamp.
    fn mark_complete(&mut self, key: DayKey) -> Result<(), CoreError>;

    fn is_completed(&self, key: DayKey) -> bool;

    fn load_all(&self) -> ProgressMap;
}

/// File-backed store at `<data_dir>/progress.json`.
pub struct JsonProgressStore {
    path: PathBuf,
    map: ProgressMap,
}

impl JsonProgressStore {
    pub fn open_default() -> Result<Self, CoreError> {
        Ok(Self::open(super::data_dir()?.join("progress.json")))
    }

    /// Missing or unparseable files load as an empty mapping.
    pub fn open(path: PathBuf) -> Self {
        let map = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        Self { path, map }
    }

    fn persist(&self) -> Result<(), CoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&self.map)?;
        fs::write(&tmp, data).map_err(|e| StoreError::WriteFailed {
            path: tmp.clone(),
            message: e.to_string(),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

impl ProgressStore for JsonProgressStore {
    fn mark_complete(&mut self, key: DayKey) -> Result<(), CoreError> {
        self.map.insert(
            key,
            ProgressRecord {
                completed: true,
                completed_at: Utc::now(),
            },
        );
        self.persist()?;
        tracing::info!(day = %key, "progress saved");
        Ok(())
    }

    fn is_completed(&self, key: DayKey) -> bool {
        self.map.get(&key).map(|r| r.completed).unwrap_or(false)
    }

    fn load_all(&self) -> ProgressMap {
        self.map.clone()
    }
}

/// In-memory store for tests and degraded fallback.
#[derive(Default)]
pub struct MemoryProgressStore {
    map: ProgressMap,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn mark_complete(&mut self, key: DayKey) -> Result<(), CoreError> {
        self.map.insert(
            key,
            ProgressRecord {
                completed: true,
                completed_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn is_completed(&self, key: DayKey) -> bool {
        self.map.get(&key).map(|r| r.completed).unwrap_or(false)
    }

    fn load_all(&self) -> ProgressMap {
        self.map.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_complete_is_idempotent() {
        let mut store = MemoryProgressStore::new();
        assert!(!store.is_completed(DayKey::Hug));
        store.mark_complete(DayKey::Hug).unwrap();
        let first = store.load_all()[&DayKey::Hug].completed_at;
        store.mark_complete(DayKey::Hug).unwrap();
        assert!(store.is_completed(DayKey::Hug));
        // Timestamp refreshed (or equal on a coarse clock), completed stays true.
        assert!(store.load_all()[&DayKey::Hug].completed_at >= first);
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProgressStore::open(dir.path().join("progress.json"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonProgressStore::open(path);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn progress_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = JsonProgressStore::open(path.clone());
        store.mark_complete(DayKey::Rose).unwrap();
        store.mark_complete(DayKey::Kiss).unwrap();

        let reloaded = JsonProgressStore::open(path);
        assert!(reloaded.is_completed(DayKey::Rose));
        assert!(reloaded.is_completed(DayKey::Kiss));
        assert!(!reloaded.is_completed(DayKey::Teddy));
        assert_eq!(reloaded.load_all().len(), 2);
    }
}
