// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter expression types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CURSOR_KEY, QUERY_KEY};
use crate::error::{Error, Result};

/// Comparison operators understood by the remote query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equal (`eq`, `==`).
    Eq,
    /// Not equal (`ne`, `!=`).
    Ne,
    /// Greater than (`gt`, `>`).
    Gt,
    /// Greater than or equal (`gte`, `>=`).
    Gte,
    /// Less than (`lt`, `<`).
    Lt,
    /// Less than or equal (`lte`, `<=`).
    Lte,
    /// Membership in a list (`in`).
    In,
}

impl Operator {
    /// The wire token for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eq" | "==" => Ok(Operator::Eq),
            "ne" | "!=" => Ok(Operator::Ne),
            "gt" | ">" => Ok(Operator::Gt),
            "gte" | ">=" => Ok(Operator::Gte),
            "lt" | "<" => Ok(Operator::Lt),
            "lte" | "<=" => Ok(Operator::Lte),
            "in" => Ok(Operator::In),
            _ => Err(Error::InvalidOperator(s.to_string())),
        }
    }
}

/// Constraint on a single entity field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Equality against a bare value. `0`, `""` and `false` are valid values.
    Value(Value),
    /// Explicitly unconstrained; the key is omitted from the wire query.
    Clear,
    /// Tagged comparison.
    Compare(Operator, Value),
}

impl FilterExpression {
    /// Equality against `value`.
    pub fn eq(value: impl Into<Value>) -> Self {
        FilterExpression::Value(value.into())
    }

    /// Clears any constraint on the field.
    pub fn clear() -> Self {
        FilterExpression::Clear
    }

    pub fn ne(value: impl Into<Value>) -> Self {
        FilterExpression::Compare(Operator::Ne, value.into())
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        FilterExpression::Compare(Operator::Gt, value.into())
    }

    pub fn gte(value: impl Into<Value>) -> Self {
        FilterExpression::Compare(Operator::Gte, value.into())
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        FilterExpression::Compare(Operator::Lt, value.into())
    }

    pub fn lte(value: impl Into<Value>) -> Self {
        FilterExpression::Compare(Operator::Lte, value.into())
    }

    /// Membership in `values`.
    pub fn in_array<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        FilterExpression::Compare(
            Operator::In,
            Value::Array(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Reads the loose JSON form.
    ///
    /// A two-element array whose head is an operator token is a comparison;
    /// any other array is a bare equality value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => FilterExpression::Clear,
            Value::Array(items) if items.len() == 2 => {
                let op = items
                    .first()
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<Operator>().ok());
                match op {
                    Some(op) => {
                        let operand = items.into_iter().nth(1).unwrap_or(Value::Null);
                        FilterExpression::Compare(op, operand)
                    }
                    None => FilterExpression::Value(Value::Array(items)),
                }
            }
            other => FilterExpression::Value(other),
        }
    }

    /// Writes the loose JSON form.
    pub fn to_value(&self) -> Value {
        match self {
            FilterExpression::Value(v) => v.clone(),
            FilterExpression::Clear => Value::Null,
            FilterExpression::Compare(op, v) => {
                Value::Array(vec![Value::String(op.as_str().to_string()), v.clone()])
            }
        }
    }
}

/// Field constraints plus the reserved free-text and cursor tokens.
///
/// Absent keys are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct FilterExpressionList {
    fields: BTreeMap<String, FilterExpression>,
    query: Option<String>,
    cursor: Option<String>,
}

impl FilterExpressionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the constraint on `field`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedKey`] for names starting with `_`.
    pub fn with(mut self, field: impl Into<String>, expr: FilterExpression) -> Result<Self> {
        self.set(field, expr)?;
        Ok(self)
    }

    /// In-place variant of [`with`](Self::with).
    pub fn set(&mut self, field: impl Into<String>, expr: FilterExpression) -> Result<()> {
        let field = field.into();
        if field.starts_with('_') {
            return Err(Error::ReservedKey(field));
        }
        self.fields.insert(field, expr);
        Ok(())
    }

    /// Sets the free-text query token (`_q`).
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }

    /// Sets the continuation cursor (`_cursor`).
    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Returns the list without its continuation cursor.
    pub fn without_cursor(mut self) -> Self {
        self.cursor = None;
        self
    }

    pub fn get(&self, field: &str) -> Option<&FilterExpression> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FilterExpression)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.query.is_none() && self.cursor.is_none()
    }
}

impl TryFrom<Map<String, Value>> for FilterExpressionList {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut list = FilterExpressionList::new();
        for (key, value) in map {
            match key.as_str() {
                QUERY_KEY => list.query = reserved_string(&key, value)?,
                CURSOR_KEY => list.cursor = reserved_string(&key, value)?,
                _ => list.set(key, FilterExpression::from_value(value))?,
            }
        }
        Ok(list)
    }
}

impl From<FilterExpressionList> for Map<String, Value> {
    fn from(list: FilterExpressionList) -> Self {
        let mut map: Map<String, Value> = list
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_value()))
            .collect();
        if let Some(q) = list.query {
            map.insert(QUERY_KEY.to_string(), Value::String(q));
        }
        if let Some(cursor) = list.cursor {
            map.insert(CURSOR_KEY.to_string(), Value::String(cursor));
        }
        map
    }
}

fn reserved_string(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(Error::InvalidExpression {
            field: key.to_string(),
            reason: format!("expected a string, got {other}"),
        }),
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
