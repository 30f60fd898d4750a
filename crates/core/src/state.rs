// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The synchronized view of a remote collection or item.
//!
//! A [`SyncState`] is an immutable snapshot. Every transition builds a new
//! snapshot from the previous one, so the fetch coordinator and the realtime
//! reconciler can interleave without locks: each applies a total function to
//! whatever snapshot is current when it runs.

use serde::Serialize;

use crate::entity::Entity;
use crate::error::TransportError;
use crate::filter::FilterExpressionList;
use crate::protocol::{Page, RealtimeUpdateItem};
use crate::reconcile::reconcile;

/// Snapshot of a synchronized list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncState {
    pub items: Vec<Entity>,
    pub loading: bool,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<TransportError>,
    pub has_more: bool,
    pub cursor: Option<String>,
    pub filters: FilterExpressionList,
}

impl SyncState {
    /// Initial snapshot. `loading` mirrors whether a fetch starts right away.
    pub fn initial(filters: FilterExpressionList, auto_fetch: bool) -> Self {
        SyncState {
            loading: auto_fetch,
            filters,
            ..Default::default()
        }
    }

    /// A fetch started. A reset empties the view before the response lands.
    ///
    /// The continuation cursor of `filters` is not retained.
    pub fn begin_fetch(&self, filters: FilterExpressionList, reset: bool) -> Self {
        SyncState {
            items: if reset { Vec::new() } else { self.items.clone() },
            loading: true,
            error: None,
            filters: filters.without_cursor(),
            ..self.clone()
        }
    }

    /// A collection page arrived; it is appended to the items current now.
    pub fn complete_page(&self, page: Page) -> Self {
        let mut items = self.items.clone();
        items.extend(page.items);
        SyncState {
            items,
            loading: false,
            error: None,
            has_more: page.has_more,
            cursor: page.cursor,
            filters: self.filters.clone(),
        }
    }

    /// A single-item fetch completed.
    pub fn complete_item(&self, item: Option<Entity>) -> Self {
        SyncState {
            items: item.into_iter().collect(),
            loading: false,
            error: None,
            has_more: false,
            cursor: None,
            filters: self.filters.clone(),
        }
    }

    /// A fetch failed. Items and cursor are kept.
    pub fn fail(&self, error: TransportError) -> Self {
        SyncState {
            loading: false,
            error: Some(error),
            ..self.clone()
        }
    }

    /// A reset fetch ended without a response. The view it wiped comes back
    /// from `prior`, with the batches folded since replayed on top.
    pub fn restore(&self, prior: &SyncState, replay: &[RealtimeUpdateItem]) -> Self {
        SyncState {
            items: reconcile(&prior.items, replay),
            loading: false,
            has_more: prior.has_more,
            cursor: prior.cursor.clone(),
            ..self.clone()
        }
    }

    /// A fetch was abandoned before its response arrived.
    pub fn settle(&self) -> Self {
        SyncState {
            loading: false,
            ..self.clone()
        }
    }

    /// Folds a realtime batch into the items.
    pub fn apply_batch(&self, batch: &[RealtimeUpdateItem]) -> Self {
        SyncState {
            items: reconcile(&self.items, batch),
            ..self.clone()
        }
    }

    /// Nothing to show: no items, not loading, no error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.loading && self.error.is_none()
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<TransportError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
