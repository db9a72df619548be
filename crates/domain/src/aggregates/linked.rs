//! Learning objects held either in full or by id

use serde::Serialize;

use super::LearningObject;
use crate::ids::LearningObjectId;

/// One entry of a list of learning objects, such as a parent's children or
/// a user's objects.
///
/// Storage may persist an entry as the whole object or as its bare id. Both
/// forms share one list so their relative order survives a round trip. On
/// the wire an embedded entry is the object document and a reference is the
/// id string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinkedObject {
    Embedded(LearningObject),
    /// Id of an object not yet loaded by the application layer
    Reference(LearningObjectId),
}

impl LinkedObject {
    pub fn object(&self) -> Option<&LearningObject> {
        match self {
            Self::Embedded(object) => Some(object),
            Self::Reference(_) => None,
        }
    }

    pub fn object_mut(&mut self) -> Option<&mut LearningObject> {
        match self {
            Self::Embedded(object) => Some(object),
            Self::Reference(_) => None,
        }
    }

    pub fn into_object(self) -> Option<LearningObject> {
        match self {
            Self::Embedded(object) => Some(object),
            Self::Reference(_) => None,
        }
    }

    /// The id of an unresolved entry.
    pub fn reference(&self) -> Option<&LearningObjectId> {
        match self {
            Self::Embedded(_) => None,
            Self::Reference(id) => Some(id),
        }
    }

    /// The entry's id, whether embedded (if stored) or referenced.
    pub fn id(&self) -> Option<&LearningObjectId> {
        match self {
            Self::Embedded(object) => object.id(),
            Self::Reference(id) => Some(id),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl From<LearningObject> for LinkedObject {
    fn from(object: LearningObject) -> Self {
        Self::Embedded(object)
    }
}

impl From<LearningObjectId> for LinkedObject {
    fn from(id: LearningObjectId) -> Self {
        Self::Reference(id)
    }
}

/// Index of the pending reference an incoming object resolves.
pub(crate) fn reference_position(
    entries: &[LinkedObject],
    object: &LearningObject,
) -> Option<usize> {
    let id = object.id()?;
    entries.iter().position(|e| e.reference() == Some(id))
}
