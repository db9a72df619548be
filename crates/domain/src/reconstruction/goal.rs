use serde_json::{Map, Value};

use super::bag::PropertyBag;
use super::schema::LEARNING_GOAL;
use super::Instantiate;
use crate::entities::LearningGoal;
use crate::error::DomainError;

impl Instantiate for LearningGoal {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        let mut bag = PropertyBag::new(&LEARNING_GOAL, bag);
        let mut goal = LearningGoal::default();
        if let Some(text) = bag.take_string("text")?.reject_null(|| DomainError::InvalidGoal)? {
            goal.set_text(text);
        }
        Ok(goal.with_extensions(bag.into_extensions()))
    }
}

/// A `goals` entry: a goal object, or a bare string in early documents.
pub(crate) fn goal_from(value: Value) -> Result<LearningGoal, DomainError> {
    match value {
        Value::Object(map) => LearningGoal::instantiate(map),
        Value::String(text) => Ok(LearningGoal::new(text)),
        _ => Err(DomainError::InvalidGoal),
    }
}
