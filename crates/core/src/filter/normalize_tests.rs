// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::filter::{FilterExpression, FilterExpressionList};
use serde_json::json;
use yare::parameterized;

fn list_of(field: &str, expr: FilterExpression) -> FilterExpressionList {
    FilterExpressionList::new().with(field, expr).unwrap()
}

#[parameterized(
    bare_string = { FilterExpression::eq("core"), json!("core") },
    bare_zero = { FilterExpression::eq(0), json!(0) },
    bare_empty_string = { FilterExpression::eq(""), json!("") },
    bare_false = { FilterExpression::eq(false), json!(false) },
    gte_number = { FilterExpression::gte(18), json!("gte|18") },
    ne_string = { FilterExpression::ne("x"), json!("ne|\"x\"") },
    lt_float = { FilterExpression::lt(1.5), json!("lt|1.5") },
    ne_null = { FilterExpression::Compare(crate::filter::Operator::Ne, json!(null)), json!("ne|null") },
    in_list = { FilterExpression::in_array(["a", "b"]), json!("in|[\"a\",\"b\"]") },
)]
fn normalize_encodes_expression(expr: FilterExpression, expected: Value) {
    let wire = normalize(&list_of("f", expr));
    assert_eq!(wire.get("f"), Some(&expected));
    assert_eq!(wire.len(), 1);
}

#[test]
fn normalize_omits_cleared_keys() {
    let list = FilterExpressionList::new()
        .with("archived", FilterExpression::clear())
        .unwrap()
        .with("team", FilterExpression::eq("core"))
        .unwrap();

    let wire = normalize(&list);

    assert!(!wire.contains_key("archived"));
    assert_eq!(wire.get("team"), Some(&json!("core")));
}

#[test]
fn normalize_passes_reserved_tokens_verbatim() {
    let list = FilterExpressionList::new()
        .with_query("gte|not-an-op")
        .with_cursor(Some("opaque==".into()));

    let wire = normalize(&list);

    assert_eq!(wire.get("_q"), Some(&json!("gte|not-an-op")));
    assert_eq!(wire.get("_cursor"), Some(&json!("opaque==")));
}

#[test]
fn normalize_never_invents_keys() {
    assert!(normalize(&FilterExpressionList::new()).is_empty());
}

#[test]
fn normalize_is_stable_for_fixed_input() {
    let list: FilterExpressionList = serde_json::from_value(json!({
        "age": ["gte", 18],
        "tags": ["in", ["a", "b"]],
        "name": "n",
        "gone": null,
        "_q": "free text"
    }))
    .unwrap();

    let first = normalize(&list);
    let second = normalize(&list);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        json!({
            "_q": "free text",
            "age": "gte|18",
            "name": "n",
            "tags": "in|[\"a\",\"b\"]"
        })
    );
}
