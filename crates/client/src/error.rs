// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use lq_core::TransportError;

/// All possible errors that can occur in the livequery library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch failed: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Core(#[from] lq_core::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("snapshot cache error: {0}")]
    Cache(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for livequery operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
