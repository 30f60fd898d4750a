// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;

/// Overrides the snapshot cache directory.
pub const LIVEQUERY_CACHE_DIR: &str = "LIVEQUERY_CACHE_DIR";

/// Returns the value of `LIVEQUERY_CACHE_DIR` if set and non-empty.
pub fn cache_dir() -> Option<PathBuf> {
    std::env::var(LIVEQUERY_CACHE_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
