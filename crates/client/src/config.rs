// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is stored in a TOML file and includes:
//! - `limit`, `fields`: default page size and field projection
//! - `realtime`, `auto_fetch`: whether queries subscribe and fetch on activation
//! - `[cache]`: request cache flags and the on-disk snapshot cache

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lq_core::FilterExpressionList;

use crate::error::{Error, Result};
use crate::sync::{CacheMode, SnapshotCache};

const CACHE_DIR_NAME: &str = "livequery";

/// Configuration shared by every query of a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Page size sent as `_limit` (default: 10).
    #[serde(default = "default_limit")]
    pub limit: Option<u32>,
    /// Field projection sent as `_fields`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    /// Subscribe to realtime updates (default: true).
    #[serde(default = "default_true")]
    pub realtime: bool,
    /// Fetch the first page on activation (default: true).
    #[serde(default = "default_true")]
    pub auto_fetch: bool,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Request cache flags and snapshot cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Let the transport answer from its cache.
    #[serde(default)]
    pub use_cache: bool,
    /// Let the transport refresh its cache.
    #[serde(default)]
    pub update_cache: bool,
    /// Keep a last-good snapshot of each query on disk (default: false).
    #[serde(default)]
    pub snapshot: bool,
    /// Snapshot directory. Defaults to `$LIVEQUERY_CACHE_DIR`, then the
    /// platform cache dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Snapshots older than this are ignored (default: 86400). 0 = no expiry.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            use_cache: false,
            update_cache: false,
            snapshot: false,
            dir: None,
            max_age_secs: default_max_age_secs(),
        }
    }
}

fn default_limit() -> Option<u32> {
    Some(10)
}

fn default_true() -> bool {
    true
}

fn default_max_age_secs() -> u64 {
    86_400
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            limit: default_limit(),
            fields: None,
            realtime: true,
            auto_fetch: true,
            cache: CacheConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Saves configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Query options derived from this configuration.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            limit: self.limit,
            fields: self.fields.clone(),
            filters: FilterExpressionList::new(),
            realtime: self.realtime,
            auto_fetch: self.auto_fetch,
            cache: CacheMode {
                use_cache: self.cache.use_cache,
                update_cache: self.cache.update_cache,
            },
        }
    }

    /// Directory for snapshot files.
    pub fn snapshot_dir(&self) -> Option<PathBuf> {
        crate::env::cache_dir()
            .or_else(|| self.cache.dir.clone())
            .or_else(|| dirs::cache_dir().map(|d| d.join(CACHE_DIR_NAME)))
    }

    /// Opens the snapshot cache, or `None` when snapshots are disabled.
    pub fn open_snapshot_cache(&self) -> Result<Option<SnapshotCache>> {
        if !self.cache.snapshot {
            return Ok(None);
        }
        let dir = self
            .snapshot_dir()
            .ok_or_else(|| Error::Config("no cache directory available".to_string()))?;
        Ok(Some(SnapshotCache::open(&dir, self.cache.max_age_secs)?))
    }
}

/// Per-query options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOptions {
    /// Page size (`_limit`); omitted when `None`.
    pub limit: Option<u32>,
    /// Field projection (`_fields`); omitted when `None`.
    pub fields: Option<String>,
    /// Filters applied on activation.
    #[serde(rename = "where")]
    pub filters: FilterExpressionList,
    pub realtime: bool,
    pub auto_fetch: bool,
    /// Cache mode for activation and `fetch_more`.
    pub cache: CacheMode,
}

impl Default for QueryOptions {
    fn default() -> Self {
        ClientConfig::default().query_options()
    }
}

impl QueryOptions {
    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn with_filters(mut self, filters: FilterExpressionList) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    pub fn without_realtime(mut self) -> Self {
        self.realtime = false;
        self
    }

    pub fn without_auto_fetch(mut self) -> Self {
        self.auto_fetch = false;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
