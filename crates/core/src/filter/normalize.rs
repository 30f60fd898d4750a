// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative filters → wire query parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::expr::{FilterExpression, FilterExpressionList};
use super::{CURSOR_KEY, QUERY_KEY};

/// Wire-ready filters, keyed by query parameter name in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireFilters(BTreeMap<String, Value>);

impl WireFilters {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

/// Encodes a filter list for transmission.
///
/// Keys set to [`FilterExpression::Clear`] are omitted. Falsy equality
/// values (`0`, `""`, `false`) are kept. No key absent from the input is
/// ever emitted.
pub fn normalize(list: &FilterExpressionList) -> WireFilters {
    let mut wire = BTreeMap::new();

    for (field, expr) in list.fields() {
        match expr {
            FilterExpression::Clear => {}
            FilterExpression::Value(v) => {
                wire.insert(field.to_string(), v.clone());
            }
            FilterExpression::Compare(op, v) => {
                // Value's Display is compact JSON
                wire.insert(field.to_string(), Value::String(format!("{op}|{v}")));
            }
        }
    }

    if let Some(q) = list.query() {
        wire.insert(QUERY_KEY.to_string(), Value::String(q.to_string()));
    }
    if let Some(cursor) = list.cursor() {
        wire.insert(CURSOR_KEY.to_string(), Value::String(cursor.to_string()));
    }

    WireFilters(wire)
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
