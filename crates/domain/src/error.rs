//! Unified error types for the domain layer
//!
//! Every mutator, constructor and `instantiate` call reports failures through
//! [`DomainError`]. Messages name the offending field and value so that the
//! application layer can surface them to clients unchanged.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // =========================================================================
    // LearningObject
    // =========================================================================
    #[error("Name must be defined")]
    InvalidName,

    /// Description was missing, or empty where a non-empty one is required.
    #[error("{0}")]
    InvalidDescription(&'static str),

    #[error("{0} is not a valid length")]
    InvalidLength(String),

    #[error("{0} is not a valid academic level")]
    InvalidLevel(String),

    #[error("{0} has already been added to levels")]
    LevelExists(String),

    #[error("Levels must contain at least one valid academic level")]
    InvalidLevels,

    #[error("Outcome must be a valid learning outcome")]
    InvalidOutcome,

    #[error("Learning object must contain at least one valid outcome")]
    InvalidOutcomes,

    #[error("Materials must be defined: {0}")]
    InvalidMaterial(String),

    #[error("Metrics must be defined: {0}")]
    InvalidMetrics(String),

    #[error("Child must be a valid learning object")]
    InvalidChild,

    #[error("Contributor must be a valid user")]
    InvalidContributor,

    #[error("Author must be a valid user")]
    InvalidAuthor,

    #[error("Collection must be defined")]
    InvalidCollection,

    #[error("{0} is not a valid status")]
    InvalidStatus(String),

    #[error("Invalid lock: {0}")]
    InvalidLock(String),

    /// State change rejected because it would break a publication invariant
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    // =========================================================================
    // LearningOutcome and its plans
    // =========================================================================
    #[error("{0} is not a valid Bloom taxon")]
    InvalidBloom(String),

    #[error("{verb} is not a valid verb for the {bloom} taxon")]
    InvalidVerb { bloom: String, verb: String },

    /// Text was missing, or empty where a non-empty one is required.
    #[error("{0}")]
    InvalidText(&'static str),

    #[error("{plan} is not a valid assessment plan for the {bloom} taxon")]
    InvalidPlan { bloom: String, plan: String },

    #[error("{instruction} is not a valid instructional strategy for the {bloom} taxon")]
    InvalidInstruction { bloom: String, instruction: String },

    #[error("Invalid outcome mapping: {0}")]
    InvalidMapping(String),

    #[error("Goal must be a valid learning goal")]
    InvalidGoal,

    // =========================================================================
    // User
    // =========================================================================
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    #[error("Object must be a valid learning object")]
    InvalidObject,

    // =========================================================================
    // Shared
    // =========================================================================
    /// Removal index past the end of an owned collection
    #[error("Index {index} is out of range for {collection} (length {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// A persisted field held a JSON value of the wrong shape
    #[error("{entity}.{field} must be {expected}")]
    InvalidFieldType {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidDate(String),

    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

impl DomainError {
    /// Create an index out of range error for a named collection
    pub fn index_out_of_range(collection: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            collection,
            index,
            len,
        }
    }

    /// Create a field type mismatch error
    pub fn field_type(entity: &'static str, field: &'static str, expected: &'static str) -> Self {
        Self::InvalidFieldType {
            entity,
            field,
            expected,
        }
    }

    /// Create an invalid verb error
    pub fn invalid_verb(bloom: impl Into<String>, verb: impl Into<String>) -> Self {
        Self::InvalidVerb {
            bloom: bloom.into(),
            verb: verb.into(),
        }
    }

    /// Create an invalid state transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Create an invalid taxonomy error
    pub fn invalid_taxonomy(msg: impl Into<String>) -> Self {
        Self::InvalidTaxonomy(msg.into())
    }
}

/// Removes and returns `items[index]`, or reports which collection was indexed
/// out of range.
pub(crate) fn remove_at<T>(
    items: &mut Vec<T>,
    index: usize,
    collection: &'static str,
) -> Result<T, DomainError> {
    if index < items.len() {
        Ok(items.remove(index))
    } else {
        Err(DomainError::index_out_of_range(collection, index, items.len()))
    }
}
