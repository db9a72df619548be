//! Value objects - immutable, validated building blocks of entities
//!
//! Value objects are compared by value and carry no identity. Those with
//! invariants (`Email`, the classification enums) are valid by construction;
//! the rest (`Material`, `Metrics`, `LearningObjectLock`, `Rating`) are
//! opaque metadata owned by the surrounding system.

pub mod classification;
pub mod email;
pub mod lock;
pub mod material;
pub mod metrics;
pub mod outcome_mapping;
pub mod rating;
pub mod standard_outcome;

pub use classification::{AcademicLevel, Length, Status};
pub use email::Email;
pub use lock::{LearningObjectLock, Restriction};
pub use material::{FolderDescription, LearningObjectPdf, Material, MaterialFile, Url};
pub use metrics::Metrics;
pub use outcome_mapping::OutcomeMapping;
pub use rating::Rating;
pub use standard_outcome::StandardOutcome;
