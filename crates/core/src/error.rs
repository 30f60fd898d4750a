// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lq-core operations.

use thiserror::Error;

/// Errors raised while building filters or references.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid filter operator: '{0}'\n  hint: valid operators are: eq, ne, gt, gte, lt, lte, in")]
    InvalidOperator(String),

    #[error("reserved filter key: '{0}'\n  hint: keys starting with '_' are set through the query and cursor setters")]
    ReservedKey(String),

    #[error("invalid filter expression for '{field}': {reason}")]
    InvalidExpression { field: String, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for lq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a remote fetch, as recorded in [`SyncState::error`](crate::SyncState).
///
/// Payloads are strings so the error can live inside a cloned state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not reach the server.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Request defaults could not be resolved.
    #[error("request options unavailable: {0}")]
    Options(String),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
