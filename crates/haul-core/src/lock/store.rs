//! Lock file persistence.
//!
//! The lock file is a pretty-printed JSON object keyed by package name.
//! Updates follow read-merge-write: load the whole map, mutate in memory,
//! persist the whole map. There is no cross-process exclusion around this;
//! concurrent invocations race and the last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

use super::LockRecord;

/// In-memory mapping of package name to [`LockRecord`], bound to the lock
/// file it was loaded from.
#[derive(Debug, Clone)]
pub struct LockStore {
    path: PathBuf,
    entries: BTreeMap<String, LockRecord>,
}

impl LockStore {
    /// Load the lock file at `path`. An absent file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let bytes = fs::read(&path)
            .map_err(|e| Error::LockIo(format!("failed to read {}: {}", path.display(), e)))?;
        let entries = serde_json::from_slice(&bytes)
            .map_err(|e| Error::LockIo(format!("failed to parse {}: {}", path.display(), e)))?;

        Ok(Self { path, entries })
    }

    pub fn get(&self, name: &str) -> Option<&LockRecord> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace the record for `name`.
    pub fn upsert(&mut self, name: impl Into<String>, record: LockRecord) {
        self.entries.insert(name.into(), record);
    }

    /// Remove the record for `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<LockRecord> {
        self.entries.remove(name)
    }

    /// Write the entire mapping back to the lock file.
    ///
    /// Serializes first, writes to a sibling temp file, then renames over
    /// the target so a crash never leaves a half-written lock file.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                Error::LockIo(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| Error::LockIo(format!("failed to serialize lock data: {}", e)))?;

        let tmp_path = self.path.with_extension(format!("tmp.{}", std::process::id()));
        fs::write(&tmp_path, bytes)
            .map_err(|e| Error::LockIo(format!("failed to write {}: {}", tmp_path.display(), e)))?;

        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                Error::LockIo(format!("failed to replace {}: {}", self.path.display(), e))
            })?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            Error::LockIo(format!("failed to rename {}: {}", tmp_path.display(), e))
        })?;

        Ok(())
    }
}
