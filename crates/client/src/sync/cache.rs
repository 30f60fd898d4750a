// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort snapshot cache.
//!
//! Keeps the last good first page of each query on disk so a new session can
//! paint something before its first fetch resolves. One JSON file per key,
//! named by the SHA-256 of the key. Snapshots are never the source of truth.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use lq_core::{Entity, Reference};

use crate::config::QueryOptions;
use crate::error::{Error, Result};

/// A stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    stored_at: DateTime<Utc>,
    items: Vec<Entity>,
}

/// Directory-backed snapshot cache.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
    max_age: Option<Duration>,
}

impl SnapshotCache {
    /// Opens (creating if needed) a cache in `dir`.
    ///
    /// `max_age_secs = 0` disables expiry.
    pub fn open(dir: &Path, max_age_secs: u64) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let max_age = match max_age_secs {
            0 => None,
            secs => i64::try_from(secs).ok().and_then(Duration::try_seconds),
        };
        Ok(SnapshotCache {
            dir: dir.to_path_buf(),
            max_age,
        })
    }

    /// Cache key for a query: the reference plus its serialized options.
    pub fn key(reference: &Reference, options: &QueryOptions) -> Result<String> {
        let options = serde_json::to_string(options)?;
        Ok(format!("#cache:{}#{}", reference.as_str(), options))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(hash)))
    }

    /// Returns the stored items, or `None` if absent or expired.
    pub fn load(&self, key: &str) -> Result<Option<Vec<Entity>>> {
        self.load_at(key, Utc::now())
    }

    fn load_at(&self, key: &str, now: DateTime<Utc>) -> Result<Option<Vec<Entity>>> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Cache(format!("corrupt snapshot {}: {}", path.display(), e)))?;

        // Guard against hash collisions
        if entry.key != key {
            return Ok(None);
        }
        if let Some(max_age) = self.max_age {
            if now - entry.stored_at > max_age {
                return Ok(None);
            }
        }
        Ok(Some(entry.items))
    }

    /// Replaces the snapshot for `key`.
    pub fn store(&self, key: &str, items: &[Entity]) -> Result<()> {
        self.store_at(key, items, Utc::now())
    }

    fn store_at(&self, key: &str, items: &[Entity], stored_at: DateTime<Utc>) -> Result<()> {
        let entry = CacheEntry {
            key: key.to_string(),
            stored_at,
            items: items.to_vec(),
        };
        let json = serde_json::to_string(&entry)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Deletes the snapshot for `key`, if any.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
