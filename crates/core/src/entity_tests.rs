// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

fn entity(value: Value) -> Entity {
    Entity::from_value(value).unwrap()
}

#[parameterized(
    text = { json!({"id": "a"}), Some(EntityId::Text("a".into())) },
    number = { json!({"id": 7}), Some(EntityId::Number("7".into())) },
    missing = { json!({"name": "x"}), None },
    null = { json!({"id": null}), None },
    boolean = { json!({"id": true}), None },
    nested = { json!({"id": {"k": 1}}), None },
)]
fn entity_id_extraction(value: Value, expected: Option<EntityId>) {
    assert_eq!(entity(value).id(), expected);
}

#[test]
fn text_and_numeric_ids_do_not_collide() {
    let text = entity(json!({"id": "1"})).id().unwrap();
    let number = entity(json!({"id": 1})).id().unwrap();
    assert_ne!(text, number);
    assert_eq!(text.to_string(), number.to_string());
}

#[test]
fn from_value_rejects_non_objects() {
    assert!(Entity::from_value(json!([1, 2])).is_none());
    assert!(Entity::from_value(json!("a")).is_none());
    assert!(Entity::from_value(Value::Null).is_none());
}

#[test]
fn merged_overwrites_top_level_fields_only() {
    let base = entity(json!({"id": 2, "v": 2, "nested": {"a": 1, "b": 2}, "keep": true}));
    let patch = entity(json!({"id": 2, "v": 99, "nested": {"a": 5}}));

    let merged = base.merged(&patch);

    assert_eq!(
        merged.into_value(),
        json!({"id": 2, "v": 99, "nested": {"a": 5}, "keep": true})
    );
}

#[test]
fn encode_decode_typed_record() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Todo {
        id: String,
        done: bool,
    }

    let todo = Todo {
        id: "t1".into(),
        done: false,
    };
    let e = Entity::encode(&todo).unwrap();
    assert_eq!(e.id(), Some(EntityId::from("t1")));
    assert_eq!(e.decode::<Todo>().unwrap(), todo);
}

#[test]
fn encode_rejects_scalars() {
    assert!(Entity::encode(&42).is_err());
}
