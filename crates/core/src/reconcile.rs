// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fold realtime batches into an item list.
//!
//! Fold rules:
//! - Add: prepended in batch order (newest first); an existing item with the
//!   same id is replaced rather than duplicated
//! - Modified: shallow-merged into the matching existing item; the last
//!   payload for an id within a batch wins
//! - Remove: the matching existing item is dropped
//!
//! Entries without a usable id are skipped. The fold is total and an empty
//! batch is the identity.

use std::collections::{HashMap, HashSet};

use crate::entity::{Entity, EntityId};
use crate::protocol::{RealtimeUpdateItem, UpdateType};

/// Applies `batch` to `items`, returning the new sequence.
pub fn reconcile(items: &[Entity], batch: &[RealtimeUpdateItem]) -> Vec<Entity> {
    if batch.is_empty() {
        return items.to_vec();
    }

    let mut modified: HashMap<EntityId, &Entity> = HashMap::new();
    let mut removed: HashSet<EntityId> = HashSet::new();
    let mut added: Vec<Entity> = Vec::new();
    let mut added_at: HashMap<EntityId, usize> = HashMap::new();

    for update in batch {
        let Some(id) = update.data.id() else {
            tracing::debug!(kind = ?update.kind, "skipping realtime update without id");
            continue;
        };
        match update.kind {
            UpdateType::Modified => {
                modified.insert(id, &update.data);
            }
            UpdateType::Remove => {
                removed.insert(id);
            }
            UpdateType::Add => match added_at.get(&id) {
                Some(&at) => added[at] = update.data.clone(),
                None => {
                    added_at.insert(id, added.len());
                    added.push(update.data.clone());
                }
            },
        }
    }

    let survivors = items.iter().filter_map(|item| {
        let id = item.id();
        match &id {
            Some(id) if removed.contains(id) || added_at.contains_key(id) => None,
            Some(id) => Some(match modified.get(id) {
                Some(patch) => item.merged(patch),
                None => item.clone(),
            }),
            None => Some(item.clone()),
        }
    });

    added.into_iter().chain(survivors).collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
