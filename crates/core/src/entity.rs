// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entities held in a synchronized list.
//!
//! An entity is any JSON object carrying a stable `id`. The engine never
//! interprets other fields; it only needs the id to fold realtime updates
//! and a shallow merge to apply `modified` payloads.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the entity identifier.
pub const ID_FIELD: &str = "id";

/// Stable identifier of an entity.
///
/// String and numeric ids are kept apart so `"1"` and `1` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    Text(String),
    Number(String),
}

impl EntityId {
    /// Extracts an id from a JSON value. Only strings and numbers qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(EntityId::Text(s.clone())),
            Value::Number(n) => Some(EntityId::Number(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Text(s) | EntityId::Number(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n.to_string())
    }
}

/// A record in the synchronized list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    /// Creates an entity from a JSON object map.
    pub fn new(fields: Map<String, Value>) -> Self {
        Entity(fields)
    }

    /// Builds an entity from an arbitrary JSON value.
    ///
    /// Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Entity(map)),
            _ => None,
        }
    }

    /// Serializes any record into an entity.
    pub fn encode<T: Serialize>(record: &T) -> crate::Result<Self> {
        let value = serde_json::to_value(record)?;
        Entity::from_value(value).ok_or_else(|| crate::Error::InvalidExpression {
            field: ID_FIELD.to_string(),
            reason: "entities must serialize to a JSON object".to_string(),
        })
    }

    /// Deserializes the entity into a caller-defined record type.
    pub fn decode<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    /// The entity id, if present and well-formed.
    pub fn id(&self) -> Option<EntityId> {
        self.0.get(ID_FIELD).and_then(EntityId::from_value)
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Top-level fields of the entity.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns a copy with every top-level field of `patch` written over this one.
    pub fn merged(&self, patch: &Entity) -> Entity {
        let mut fields = self.0.clone();
        for (key, value) in &patch.0 {
            fields.insert(key.clone(), value.clone());
        }
        Entity(fields)
    }

    /// Consumes the entity, returning its JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(fields: Map<String, Value>) -> Self {
        Entity(fields)
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
