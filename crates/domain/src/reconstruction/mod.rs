//! Reconstruction of validated entities from persisted documents
//!
//! Stored documents were written by several generations of the platform, so
//! the same field may appear under different names (`_name`, `name`, or a
//! first-generation name like `level`). [`schema`] lists, per entity, every
//! concept and the names it was stored under in priority order; a
//! property bag resolves each concept against the raw JSON map.
//!
//! Reconstruction rules:
//!
//! - a missing concept keeps the value a blank entity is constructed with
//! - a present value goes through the same validating setter as live
//!   mutation, so invalid stored data fails instead of being repaired
//! - nested entities are reconstructed recursively
//! - keys no concept claims, and values shadowed by a higher-priority name,
//!   are kept in the entity's [`Extensions`] and written back on
//!   serialization
//!
//! Every entity also implements `serde::Deserialize` through
//! [`Instantiate::instantiate`].

pub(crate) mod bag;
pub mod schema;

mod goal;
mod object;
mod outcome;
mod plans;
mod user;
pub(crate) mod write;

use serde_json::{Map, Value};

use crate::error::DomainError;

pub use schema::SchemaRevision;

/// Persisted fields an entity does not model, kept verbatim.
pub type Extensions = Map<String, Value>;

/// Rebuilds a validated entity from a persisted property bag.
pub trait Instantiate: Sized {
    /// # Errors
    ///
    /// Fails with the error the matching setter reports when a present field
    /// holds an invalid value, or `DomainError::InvalidFieldType` when it has
    /// the wrong JSON shape.
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError>;

    /// Convenience for callers holding an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// As [`Instantiate::instantiate`], plus `DomainError::InvalidFieldType`
    /// when `value` is not an object.
    fn instantiate_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Self::instantiate(map),
            _ => Err(DomainError::field_type("document", "root", "an object")),
        }
    }
}

/// Implements `Deserialize` for entities by reading a JSON object and
/// running it through [`Instantiate`].
macro_rules! deserialize_via_instantiate {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let bag = <Map<String, Value> as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty as Instantiate>::instantiate(bag).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

deserialize_via_instantiate!(
    crate::entities::User,
    crate::entities::LearningGoal,
    crate::entities::LearningOutcome,
    crate::entities::AssessmentPlan,
    crate::entities::InstructionalStrategy,
    crate::aggregates::LearningObject,
    crate::submittable::SubmittableLearningObject,
    crate::submittable::SubmittableLearningOutcome,
);
