// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resource references.
//!
//! A reference is a slash-delimited path. An odd number of segments names a
//! collection (`users`, `users/u1/posts`); an even number names a single item
//! whose id is the last segment (`users/u1`). Classification looks only at
//! the segment count.

use std::fmt;

const SEPARATOR: char = '/';

/// Classification of a reference plus its realtime subscription key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resolved {
    /// Key the realtime channel is registered against.
    pub subscription_key: String,
    /// True for collection references, false for single items.
    pub is_collection: bool,
}

/// Classifies `reference`.
///
/// The query component (after the first `?`) and leading/trailing
/// separators are ignored. Item references subscribe to their parent
/// collection.
pub fn resolve(reference: &str) -> Resolved {
    let path = reference.split('?').next().unwrap_or_default();
    let path = path.trim_matches(SEPARATOR);
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    let is_collection = segments.len() % 2 == 1;

    let subscription_key = if is_collection {
        path.to_string()
    } else {
        segments[..segments.len() - 1].join("/")
    };

    Resolved {
        subscription_key,
        is_collection,
    }
}

/// A non-empty reference, as passed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    raw: String,
    resolved: Resolved,
}

impl Reference {
    /// Parses a reference. Empty references are inactive and yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let path = raw.split('?').next().unwrap_or_default();
        if path.trim_matches(SEPARATOR).is_empty() {
            return None;
        }
        Some(Reference {
            raw: raw.to_string(),
            resolved: resolve(raw),
        })
    }

    /// The reference as given, including any query component.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_collection(&self) -> bool {
        self.resolved.is_collection
    }

    pub fn subscription_key(&self) -> &str {
        &self.resolved.subscription_key
    }

    pub fn resolved(&self) -> &Resolved {
        &self.resolved
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[path = "reference_tests.rs"]
mod tests;
