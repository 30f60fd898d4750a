// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lq-core: Shared building blocks for livequery
//!
//! This crate holds the pure, synchronous parts of the sync engine: the
//! entity model, filter normalization, reference resolution, the fetch
//! gate, the state snapshot and the realtime fold. Nothing here performs
//! I/O; the async coordinator lives in the `livequery` crate.

pub mod entity;
pub mod error;
pub mod filter;
pub mod gate;
pub mod protocol;
pub mod reconcile;
pub mod reference;
pub mod state;

pub use entity::{Entity, EntityId};
pub use error::{Error, Result, TransportError, TransportResult};
pub use filter::{normalize, FilterExpression, FilterExpressionList, Operator, WireFilters};
pub use gate::{FetchGate, GateState};
pub use protocol::{Page, RealtimeBatch, RealtimeUpdateItem, UpdateType};
pub use reconcile::reconcile;
pub use reference::{resolve, Reference, Resolved};
pub use state::SyncState;
