// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire shapes exchanged with the remote collection.
//!
//! - A collection fetch answers with a [`Page`].
//! - The realtime channel delivers [`RealtimeBatch`]es of add/modified/remove
//!   notifications.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// One page of a collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub items: Vec<Entity>,
    /// Resume point for the next page; `None` when there is none.
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl Page {
    pub fn new(items: Vec<Entity>, cursor: Option<String>, has_more: bool) -> Self {
        Page {
            items,
            cursor,
            has_more,
        }
    }
}

/// Kind of change carried by a [`RealtimeUpdateItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Add,
    Modified,
    Remove,
}

/// A single change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeUpdateItem {
    #[serde(rename = "type")]
    pub kind: UpdateType,
    pub data: Entity,
}

impl RealtimeUpdateItem {
    pub fn add(data: Entity) -> Self {
        RealtimeUpdateItem {
            kind: UpdateType::Add,
            data,
        }
    }

    pub fn modified(data: Entity) -> Self {
        RealtimeUpdateItem {
            kind: UpdateType::Modified,
            data,
        }
    }

    pub fn remove(data: Entity) -> Self {
        RealtimeUpdateItem {
            kind: UpdateType::Remove,
            data,
        }
    }
}

/// Changes delivered together and folded in one transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeBatch {
    #[serde(default)]
    pub items: Vec<RealtimeUpdateItem>,
}

impl RealtimeBatch {
    pub fn new(items: Vec<RealtimeUpdateItem>) -> Self {
        RealtimeBatch { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serializes the batch to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a batch from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
