//! Domain entities - objects owned by a learning object, plus users

mod learning_goal;
mod learning_outcome;
mod plans;
mod user;

pub use learning_goal::LearningGoal;
pub use learning_outcome::LearningOutcome;
pub use plans::{AssessmentPlan, InstructionalStrategy};
pub use user::User;
