//! Writing extensions back next to the canonical fields
//!
//! A value shadowed by a higher-priority field name is kept in the entity's
//! extensions under the name it was stored under. When that name is also the
//! canonical one (`name` shadowed by `_name`), the canonical value is written
//! under the class-field name instead, so reading the document again resolves
//! the same way and keeps the shadowed value.

use std::borrow::Cow;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::schema::EntitySchema;
use super::Extensions;

/// One entity's extensions, split for serialization.
pub(crate) struct WriteBack<'a> {
    extensions: Cow<'a, Extensions>,
    /// Extensions whose key is also a canonical field name
    shadowed: Vec<(&'a str, &'a Value)>,
}

impl<'a> WriteBack<'a> {
    pub(crate) fn new(schema: &EntitySchema, extensions: &'a Extensions) -> Self {
        let collides = |key: &str| schema.field(key).is_some();
        if !extensions.keys().any(|key| collides(key.as_str())) {
            return Self {
                extensions: Cow::Borrowed(extensions),
                shadowed: Vec::new(),
            };
        }

        let mut kept = Extensions::new();
        let mut shadowed = Vec::new();
        for (key, value) in extensions {
            if collides(key.as_str()) {
                shadowed.push((key.as_str(), value));
            } else {
                kept.insert(key.clone(), value.clone());
            }
        }
        Self {
            extensions: Cow::Owned(kept),
            shadowed,
        }
    }

    /// Extensions to flatten into the wire format.
    pub(crate) fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Serialize `wire`, built over [`Self::extensions`], then add back the
    /// values that share a canonical name.
    pub(crate) fn write<W, S>(&self, wire: W, serializer: S) -> Result<S::Ok, S::Error>
    where
        W: Serialize,
        S: Serializer,
    {
        if self.shadowed.is_empty() {
            return wire.serialize(serializer);
        }

        let Value::Object(mut map) = serde_json::to_value(&wire).map_err(S::Error::custom)? else {
            return Err(S::Error::custom("wire format must be a JSON object"));
        };
        for &(key, value) in &self.shadowed {
            // a skipped canonical field still has to outrank the shadowed value
            let canonical = map.remove(key).unwrap_or_else(|| unset_like(value));
            map.insert(format!("_{key}"), canonical);
            map.insert(key.to_string(), value.clone());
        }
        map.serialize(serializer)
    }
}

/// The stored form of an unset field of the same shape as `value`.
fn unset_like(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::String(String::new()),
        Value::Array(_) => Value::Array(Vec::new()),
        _ => Value::Null,
    }
}
