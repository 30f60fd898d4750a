// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::{json, Value};
use similar_asserts::assert_eq;

fn e(value: Value) -> Entity {
    Entity::from_value(value).unwrap()
}

fn values(items: Vec<Entity>) -> Vec<Value> {
    items.into_iter().map(Entity::into_value).collect()
}

#[test]
fn reconcile_empty_batch_is_identity() {
    let items = vec![e(json!({"id": 1, "v": 1})), e(json!({"id": 2, "v": 2}))];
    assert_eq!(reconcile(&items, &[]), items);
}

#[test]
fn reconcile_mixed_batch() {
    let items = vec![e(json!({"id": 1, "v": 1})), e(json!({"id": 2, "v": 2}))];
    let batch = vec![
        RealtimeUpdateItem::modified(e(json!({"id": 2, "v": 99}))),
        RealtimeUpdateItem::remove(e(json!({"id": 1}))),
        RealtimeUpdateItem::add(e(json!({"id": 3, "v": 0}))),
    ];

    let result = reconcile(&items, &batch);

    assert_eq!(
        values(result),
        vec![json!({"id": 3, "v": 0}), json!({"id": 2, "v": 99})]
    );
}

#[test]
fn reconcile_adds_are_prepended_in_batch_order() {
    let items = vec![e(json!({"id": "old"}))];
    let batch = vec![
        RealtimeUpdateItem::add(e(json!({"id": "n1"}))),
        RealtimeUpdateItem::add(e(json!({"id": "n2"}))),
    ];

    let result = reconcile(&items, &batch);

    assert_eq!(
        values(result),
        vec![json!({"id": "n1"}), json!({"id": "n2"}), json!({"id": "old"})]
    );
}

#[test]
fn reconcile_modified_last_write_in_batch_wins() {
    let items = vec![e(json!({"id": 1, "v": 1, "name": "a"}))];
    let batch = vec![
        RealtimeUpdateItem::modified(e(json!({"id": 1, "v": 2}))),
        RealtimeUpdateItem::modified(e(json!({"id": 1, "v": 3}))),
    ];

    let result = reconcile(&items, &batch);

    assert_eq!(values(result), vec![json!({"id": 1, "v": 3, "name": "a"})]);
}

#[test]
fn reconcile_modified_unknown_id_is_ignored() {
    let items = vec![e(json!({"id": 1, "v": 1}))];
    let batch = vec![RealtimeUpdateItem::modified(e(json!({"id": 42, "v": 0})))];

    assert_eq!(reconcile(&items, &batch), items);
}

#[test]
fn reconcile_remove_unknown_id_is_ignored() {
    let items = vec![e(json!({"id": 1}))];
    let batch = vec![RealtimeUpdateItem::remove(e(json!({"id": 2})))];

    assert_eq!(reconcile(&items, &batch), items);
}

#[test]
fn reconcile_skips_entries_without_id() {
    let items = vec![e(json!({"id": 1, "v": 1}))];
    let batch = vec![
        RealtimeUpdateItem::add(e(json!({"v": "no id"}))),
        RealtimeUpdateItem::remove(e(json!({"id": null}))),
        RealtimeUpdateItem::modified(e(json!({"id": [1], "v": 5}))),
    ];

    assert_eq!(reconcile(&items, &batch), items);
}

#[test]
fn reconcile_add_replaces_existing_id() {
    let items = vec![e(json!({"id": 1, "v": 1})), e(json!({"id": 2, "v": 2}))];
    let batch = vec![RealtimeUpdateItem::add(e(json!({"id": 2, "v": 20})))];

    let result = reconcile(&items, &batch);

    assert_eq!(
        values(result),
        vec![json!({"id": 2, "v": 20}), json!({"id": 1, "v": 1})]
    );
}

#[test]
fn reconcile_duplicate_add_in_batch_keeps_one() {
    let batch = vec![
        RealtimeUpdateItem::add(e(json!({"id": "x", "v": 1}))),
        RealtimeUpdateItem::add(e(json!({"id": "y"}))),
        RealtimeUpdateItem::add(e(json!({"id": "x", "v": 2}))),
    ];

    let result = reconcile(&[], &batch);

    assert_eq!(
        values(result),
        vec![json!({"id": "x", "v": 2}), json!({"id": "y"})]
    );
}

#[test]
fn reconcile_remove_does_not_cancel_add_in_same_batch() {
    let items = vec![e(json!({"id": 1, "v": "stale"}))];
    let batch = vec![
        RealtimeUpdateItem::remove(e(json!({"id": 1}))),
        RealtimeUpdateItem::add(e(json!({"id": 1, "v": "fresh"}))),
    ];

    let result = reconcile(&items, &batch);

    assert_eq!(values(result), vec![json!({"id": 1, "v": "fresh"})]);
}

#[test]
fn reconcile_keeps_existing_items_without_id() {
    let items = vec![e(json!({"name": "legacy"})), e(json!({"id": 1}))];
    let batch = vec![RealtimeUpdateItem::remove(e(json!({"id": 1})))];

    assert_eq!(values(reconcile(&items, &batch)), vec![json!({"name": "legacy"})]);
}
