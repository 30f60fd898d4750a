// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Live query synchronization.
//!
//! Keeps a local, paginated view of a remote collection or item in step with
//! the server through request/response fetches and pushed realtime batches.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  LiveQuery  │────►│   Session   │────►│  Transport  │
//! │ (lifecycle) │     │ (gate+state)│◄────│   (trait)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   ▲
//!        ▼                   │ batches
//! ┌─────────────┐     ┌─────────────┐
//! │ Connectivity│     │  Realtime   │
//! │  (reloads)  │     │  (channel)  │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - At most one fetch in flight per query; overlapping requests are dropped
//! - Realtime batches folded into state while a fetch is awaited survive it
//! - Reload on reconnect, skipped on first connect and after errors
//! - Optional on-disk snapshot shown while the first page loads
//! - Injectable transport, realtime channel and request defaults for testing

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod cache;
mod context;
mod lifecycle;
mod realtime;
mod session;
mod transport;

pub use cache::SnapshotCache;
pub use context::SyncContext;
pub use lifecycle::LiveQuery;
pub use realtime::{
    BatchHandler, ConnectedHandler, ConnectivitySignal, LocalChannel, RealtimeChannel,
    Subscription, SubscriptionId,
};
pub use session::{Fetch, Session};
pub use transport::{
    build_request, BoxFuture, CacheMode, ConfigProvider, Query, RequestDefaults, RequestHook,
    RequestOptions, StaticDefaults, Transport,
};

// Handlers never leave shared state half-written, so a poisoned lock is
// still consistent.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod test_helpers;
