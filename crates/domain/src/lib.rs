//! CLARK domain model
//!
//! Learning objects and their outcomes, goals, assessment plans and
//! instructional strategies, the users who author them, the stricter
//! submittable refinements, and reconstruction of persisted records whose
//! field names changed across schema revisions.

pub mod common;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod reconstruction;
pub mod submittable;
pub mod taxonomy;
pub mod value_objects;

pub use aggregates::{LearningObject, LinkedObject};

pub use entities::{AssessmentPlan, InstructionalStrategy, LearningGoal, LearningOutcome, User};

pub use error::DomainError;
pub use events::StatusChange;

pub use ids::{LearningObjectId, UserId};

pub use reconstruction::{Extensions, Instantiate, SchemaRevision};

pub use submittable::{Submit, SubmittableLearningObject, SubmittableLearningOutcome};

pub use taxonomy::{install as install_taxonomy, taxonomy, BloomTaxon, TaxonomyTables};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    AcademicLevel, Email, FolderDescription, LearningObjectLock, LearningObjectPdf, Length,
    Material, MaterialFile, Metrics, OutcomeMapping, Rating, Restriction, StandardOutcome, Status,
    Url,
};
