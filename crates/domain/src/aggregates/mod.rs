//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations where callers need to react
//!
//! | Concern | Rustic Equivalent |
//! |---------|-------------------|
//! | Field guards | Private fields + validating setters returning `Result` |
//! | Stricter variants | Newtype wrappers with a fallible constructor |
//! | Domain events | Return enums from mutations |

pub mod learning_object;
pub mod linked;

pub use learning_object::LearningObject;
pub use linked::LinkedObject;
