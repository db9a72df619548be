//! Submittable refinements
//!
//! Content submitted for review must meet stricter rules than a draft: a
//! non-empty description, at least one outcome, and non-empty outcome text,
//! all the way down through child objects. The stricter variants are
//! newtypes that can only be obtained through a validating conversion, and
//! whose mutators refuse to break the stricter rules.
//!
//! ```
//! use clark_domain::aggregates::LearningObject;
//! use clark_domain::submittable::Submit;
//!
//! let mut draft = LearningObject::new();
//! draft.set_name("Subnetting").unwrap();
//! assert!(draft.clone().submit().is_err());
//!
//! draft.set_description("IPv4 subnet math");
//! draft.add_blank_outcome().set_text("subnet a /24");
//! let submitted = draft.submit().unwrap();
//! assert_eq!(submitted.outcomes().len(), 1);
//! ```

mod object;
mod outcome;

use crate::error::DomainError;

pub use object::SubmittableLearningObject;
pub use outcome::SubmittableLearningOutcome;

/// Conversion of a draft into its submittable refinement.
///
/// Implemented by drafts (validating) and by the refinements themselves
/// (identity), so submittable containers accept either.
pub trait Submit {
    type Submitted;

    /// # Errors
    ///
    /// Returns the first rule the value breaks.
    fn submit(self) -> Result<Self::Submitted, DomainError>;
}
