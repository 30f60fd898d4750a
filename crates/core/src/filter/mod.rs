// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative filters and their wire encoding.
//!
//! A filter list maps entity fields to expressions:
//!
//! ```text
//! { "age": ["gte", 18], "team": "core", "archived": null, "_q": "alice" }
//! ```
//!
//! # Expressions
//!
//! - bare value: equality (`"team": "core"`)
//! - `null`: no constraint, the field is dropped from the query
//! - `[op, value]`: comparison, `op` one of `eq, ne, gt, gte, lt, lte, in`
//!
//! # Wire format
//!
//! Bare values pass through unchanged; comparisons become `"<op>|<json>"`,
//! e.g. `["gte", 18]` → `"gte|18"` and `["in", ["a","b"]]` → `"in|[\"a\",\"b\"]"`.
//! Reserved keys `_q` and `_cursor` pass through verbatim.

mod expr;
mod normalize;

pub use expr::{FilterExpression, FilterExpressionList, Operator};
pub use normalize::{normalize, WireFilters};

/// Reserved query key for the page size.
pub const LIMIT_KEY: &str = "_limit";
/// Reserved query key for the field projection.
pub const FIELDS_KEY: &str = "_fields";
/// Reserved query key for the pagination cursor.
pub const CURSOR_KEY: &str = "_cursor";
/// Reserved query key for the free-text query token.
pub const QUERY_KEY: &str = "_q";
