// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! livequery - Client-side live query synchronization.
//!
//! This crate keeps a local, paginated view of a remote collection (or a
//! single item) in step with the server. Pages arrive through a pluggable
//! [`Transport`]; pushed changes arrive through a [`RealtimeChannel`] and are
//! folded into the same state.
//!
//! # Main Components
//!
//! - [`LiveQuery`] - Activation, realtime subscription and reconnect reloads
//! - [`Session`] - Fetch gate, state cell and fetch/merge coordination
//! - [`ClientConfig`] - TOML configuration and per-query [`QueryOptions`]
//! - [`SnapshotCache`] - Last-good items shown while the first page loads
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use livequery::{ClientConfig, LiveQuery, LocalChannel, SyncContext};
//!
//! let config = ClientConfig::load(Path::new("livequery.toml"))?;
//! let channel = Arc::new(LocalChannel::new());
//! let ctx = SyncContext::new(Arc::new(my_transport))
//!     .with_local_channel(channel)
//!     .with_snapshot_cache(config.open_snapshot_cache()?);
//!
//! let query = LiveQuery::activate(ctx, "users", config.query_options()).await;
//! query.fetch_more().await?;
//! for user in query.items() { /* ... */ }
//! ```

mod env;

pub mod config;
pub mod error;
pub mod sync;

pub use config::{CacheConfig, ClientConfig, QueryOptions};
pub use error::{Error, Result};
pub use sync::{
    build_request, BoxFuture, CacheMode, ConfigProvider, ConnectivitySignal, Fetch, LiveQuery,
    LocalChannel, RealtimeChannel, RequestDefaults, RequestHook, RequestOptions, Session,
    SnapshotCache, StaticDefaults, Subscription, SyncContext, Transport,
};

pub use lq_core::{
    Entity, EntityId, FilterExpression, FilterExpressionList, Operator, Page, RealtimeBatch,
    RealtimeUpdateItem, Reference, SyncState, TransportError, TransportResult, UpdateType,
};
