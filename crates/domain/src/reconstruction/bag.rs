//! Alias-resolving view over a persisted JSON object

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::schema::{EntitySchema, SchemaRevision};
use super::{Extensions, Instantiate};
use crate::common::{from_epoch_millis, parse_timestamp};
use crate::error::DomainError;

/// A resolved concept.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Field<T> {
    /// No alias was present
    Missing,
    /// Only explicit nulls were present
    Null,
    Present(T),
}

impl<T> Field<T> {
    /// The value, treating an explicit null like a missing field.
    pub(crate) fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }

    /// The value if present; an explicit null fails with `err`.
    pub(crate) fn reject_null(
        self,
        err: impl FnOnce() -> DomainError,
    ) -> Result<Option<T>, DomainError> {
        match self {
            Self::Present(value) => Ok(Some(value)),
            Self::Missing => Ok(None),
            Self::Null => Err(err()),
        }
    }
}

/// Persisted document for one entity, consumed concept by concept.
#[derive(Debug)]
pub(crate) struct PropertyBag {
    schema: &'static EntitySchema,
    map: Map<String, Value>,
    /// Non-null values that lost to a higher-priority alias, by alias
    shadowed: Map<String, Value>,
}

impl PropertyBag {
    pub(crate) fn new(schema: &'static EntitySchema, map: Map<String, Value>) -> Self {
        Self {
            schema,
            map,
            shadowed: Map::new(),
        }
    }

    /// Remove every alias of `concept` from the bag and resolve them.
    ///
    /// The highest-priority non-null value wins. Non-null values under
    /// lower-priority aliases are kept for the extensions under the alias
    /// they were stored under.
    pub(crate) fn take(&mut self, concept: &'static str) -> Field<Value> {
        let entity = self.schema.entity;
        let Some(field) = self.schema.field(concept) else {
            tracing::error!(entity, concept, "Concept missing from schema table");
            return Field::Missing;
        };

        let mut resolved = Field::Missing;
        for &(revision, alias) in field.aliases {
            let Some(value) = self.map.remove(alias) else {
                continue;
            };
            let shadowed = matches!(resolved, Field::Present(_));
            match (shadowed, value) {
                (true, Value::Null) => {}
                (true, value) => {
                    tracing::warn!(
                        entity,
                        concept,
                        alias,
                        "Keeping value shadowed by a higher-priority field name"
                    );
                    self.shadowed.insert(alias.to_string(), value);
                }
                (_, Value::Null) => resolved = Field::Null,
                (_, value) => {
                    if revision == SchemaRevision::Original {
                        tracing::debug!(entity, concept, alias, "Resolved first-generation field name");
                    } else {
                        tracing::trace!(entity, concept, alias, ?revision, "Resolved field");
                    }
                    resolved = Field::Present(value);
                }
            }
        }
        resolved
    }

    /// Remove every alias of a derived concept, shadowed values included.
    pub(crate) fn discard(&mut self, concept: &'static str) {
        if let Some(field) = self.schema.field(concept) {
            for &(_, alias) in field.aliases {
                if self.map.remove(alias).is_some() {
                    tracing::trace!(entity = self.schema.entity, alias, "Discarding derived field");
                }
            }
        }
    }

    fn mismatch(&self, concept: &'static str, expected: &'static str) -> DomainError {
        DomainError::field_type(self.schema.entity, concept, expected)
    }

    pub(crate) fn take_string(&mut self, concept: &'static str) -> Result<Field<String>, DomainError> {
        match self.take(concept) {
            Field::Present(Value::String(s)) => Ok(Field::Present(s)),
            Field::Present(_) => Err(self.mismatch(concept, "a string")),
            Field::Missing => Ok(Field::Missing),
            Field::Null => Ok(Field::Null),
        }
    }

    pub(crate) fn take_bool(&mut self, concept: &'static str) -> Result<Field<bool>, DomainError> {
        match self.take(concept) {
            Field::Present(Value::Bool(b)) => Ok(Field::Present(b)),
            Field::Present(_) => Err(self.mismatch(concept, "a boolean")),
            Field::Missing => Ok(Field::Missing),
            Field::Null => Ok(Field::Null),
        }
    }

    pub(crate) fn take_u32(&mut self, concept: &'static str) -> Result<Field<u32>, DomainError> {
        match self.take(concept) {
            Field::Present(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Field::Present)
                .ok_or_else(|| self.mismatch(concept, "a non-negative integer")),
            Field::Missing => Ok(Field::Missing),
            Field::Null => Ok(Field::Null),
        }
    }

    pub(crate) fn take_array(&mut self, concept: &'static str) -> Result<Field<Vec<Value>>, DomainError> {
        match self.take(concept) {
            Field::Present(Value::Array(items)) => Ok(Field::Present(items)),
            Field::Present(_) => Err(self.mismatch(concept, "an array")),
            Field::Missing => Ok(Field::Missing),
            Field::Null => Ok(Field::Null),
        }
    }

    /// A timestamp stored as epoch milliseconds (string or number) or RFC 3339.
    pub(crate) fn take_timestamp(
        &mut self,
        concept: &'static str,
    ) -> Result<Field<DateTime<Utc>>, DomainError> {
        match self.take(concept) {
            // blank users were once persisted with `createdAt: ""`
            Field::Present(Value::String(s)) if s.trim().is_empty() => Ok(Field::Missing),
            Field::Present(Value::String(s)) => parse_timestamp(&s).map(Field::Present),
            Field::Present(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| DomainError::InvalidDate(n.to_string()))
                .and_then(from_epoch_millis)
                .map(Field::Present),
            Field::Present(_) => Err(self.mismatch(concept, "a timestamp")),
            Field::Missing => Ok(Field::Missing),
            Field::Null => Ok(Field::Null),
        }
    }

    /// A nested entity stored as an object; any other shape fails with `err`.
    pub(crate) fn take_entity<T: Instantiate>(
        &mut self,
        concept: &'static str,
        err: impl FnOnce() -> DomainError,
    ) -> Result<Field<T>, DomainError> {
        match self.take(concept) {
            Field::Present(Value::Object(map)) => T::instantiate(map).map(Field::Present),
            Field::Present(_) => Err(err()),
            Field::Missing => Ok(Field::Missing),
            Field::Null => Ok(Field::Null),
        }
    }

    /// Unclaimed keys and shadowed values, to be written back unchanged.
    pub(crate) fn into_extensions(self) -> Extensions {
        let Self {
            schema,
            mut map,
            shadowed,
        } = self;
        if !map.is_empty() {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            tracing::debug!(entity = schema.entity, ?keys, "Preserving unrecognized fields");
        }
        map.extend(shadowed);
        map
    }
}

/// Reconstruct one array element as an entity; non-objects fail with `err`.
pub(crate) fn entity_from<T: Instantiate>(
    value: Value,
    err: impl FnOnce() -> DomainError,
) -> Result<T, DomainError> {
    match value {
        Value::Object(map) => T::instantiate(map),
        _ => Err(err()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruction::schema::{LEARNING_OBJECT, LEARNING_OUTCOME, USER};
    use serde_json::json;

    fn bag(schema: &'static EntitySchema, value: Value) -> PropertyBag {
        match value {
            Value::Object(map) => PropertyBag::new(schema, map),
            _ => panic!("test bags are objects"),
        }
    }

    #[test]
    fn class_field_beats_accessor() {
        let mut b = bag(&USER, json!({ "_username": "new", "username": "old" }));
        assert_eq!(b.take_string("username").unwrap(), Field::Present("new".into()));
        assert!(b.into_extensions().is_empty());
    }

    #[test]
    fn accessor_used_when_class_field_absent() {
        let mut b = bag(&USER, json!({ "username": "nvisal1" }));
        assert_eq!(b.take_string("username").unwrap(), Field::Present("nvisal1".into()));
    }

    #[test]
    fn null_yields_to_lower_priority() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "_levels": null, "level": ["graduate"] }));
        assert_eq!(b.take("levels"), Field::Present(json!(["graduate"])));
    }

    #[test]
    fn only_nulls_resolve_to_null() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "_name": null, "name": null }));
        assert_eq!(b.take("name"), Field::Null);
        assert_eq!(b.take("description"), Field::Missing);
    }

    #[test]
    fn first_generation_alias() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "repository": { "notes": "n" } }));
        assert_eq!(b.take("materials"), Field::Present(json!({ "notes": "n" })));
    }

    #[test]
    fn unclaimed_keys_become_extensions() {
        let mut b = bag(&USER, json!({ "name": "Cara", "ratings": 3 }));
        b.take("name");
        let ext = b.into_extensions();
        assert_eq!(ext.get("ratings"), Some(&json!(3)));
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn shadowed_values_become_extensions() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "_name": "New", "name": "Old title" }));
        assert_eq!(b.take("name"), Field::Present(json!("New")));
        let ext = b.into_extensions();
        assert_eq!(ext.get("name"), Some(&json!("Old title")));
        assert!(ext.get("_name").is_none());
    }

    #[test]
    fn shadowed_nulls_are_dropped() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "levels": ["graduate"], "level": null }));
        assert_eq!(b.take("levels"), Field::Present(json!(["graduate"])));
        assert!(b.into_extensions().is_empty());
    }

    #[test]
    fn discard_drops_every_alias() {
        let mut b = bag(&LEARNING_OUTCOME, json!({ "_outcome": "a", "outcome": "b", "x": 1 }));
        b.discard("outcome");
        let ext = b.into_extensions();
        assert_eq!(ext.len(), 1);
        assert!(ext.contains_key("x"));
    }

    #[test]
    fn typed_takes_report_shape() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "name": 5, "published": "yes", "levels": "x" }));
        assert_eq!(
            b.take_string("name").unwrap_err(),
            DomainError::field_type("LearningObject", "name", "a string")
        );
        assert!(b.take_bool("published").is_err());
        assert!(b.take_array("levels").is_err());
    }

    #[test]
    fn timestamps_accept_strings_and_numbers() {
        let mut b = bag(&LEARNING_OBJECT, json!({ "date": 1533081600000_i64 }));
        let Field::Present(dt) = b.take_timestamp("date").unwrap() else {
            panic!("date should be present");
        };
        assert_eq!(dt.timestamp_millis(), 1_533_081_600_000);

        let mut b = bag(&LEARNING_OBJECT, json!({ "_date": "1533081600000" }));
        assert!(matches!(b.take_timestamp("date").unwrap(), Field::Present(_)));

        let mut b = bag(&LEARNING_OBJECT, json!({ "date": "yesterday" }));
        assert!(matches!(b.take_timestamp("date"), Err(DomainError::InvalidDate(_))));
    }
}
