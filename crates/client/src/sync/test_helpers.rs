// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use lq_core::{Entity, RealtimeBatch, RealtimeUpdateItem, Reference};
use serde_json::{json, Value};

use super::context::SyncContext;
use super::session::Session;
use super::transport_tests::MockTransport;
use crate::config::QueryOptions;

/// Create an entity from a JSON object literal.
pub fn entity(value: Value) -> Entity {
    Entity::from_value(value).unwrap()
}

pub fn batch(items: Vec<RealtimeUpdateItem>) -> RealtimeBatch {
    RealtimeBatch::new(items)
}

/// A collection response body.
pub fn page_body(ids: &[i64], cursor: Option<&str>, has_more: bool) -> Value {
    let items: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
    json!({"items": items, "cursor": cursor, "has_more": has_more})
}

/// The `id` field of each item, in order.
pub fn ids(items: &[Entity]) -> Vec<Value> {
    items
        .iter()
        .map(|item| item.get("id").cloned().unwrap_or(Value::Null))
        .collect()
}

pub fn make_session(transport: &MockTransport, reference: &str, options: QueryOptions) -> Session {
    let ctx = SyncContext::new(Arc::new(transport.clone()));
    Session::new(ctx, Reference::parse(reference), options)
}
