use std::ops::Deref;

use serde::Serialize;
use serde_json::{Map, Value};

use super::Submit;
use crate::common::non_blank;
use crate::entities::{AssessmentPlan, InstructionalStrategy, LearningOutcome};
use crate::error::DomainError;
use crate::reconstruction::Instantiate;
use crate::value_objects::OutcomeMapping;

pub(super) const EMPTY_TEXT: &str = "Text must not be an empty string.";

/// A learning outcome whose text is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmittableLearningOutcome(LearningOutcome);

impl SubmittableLearningOutcome {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidText` if the outcome text is empty.
    pub fn new(outcome: LearningOutcome) -> Result<Self, DomainError> {
        check(&outcome)?;
        Ok(Self(outcome))
    }

    /// Wraps an outcome taken out of a submittable object, whose outcomes
    /// have already passed [`check`].
    pub(super) fn trusted(outcome: LearningOutcome) -> Self {
        Self(outcome)
    }

    pub fn into_inner(self) -> LearningOutcome {
        self.0
    }

    /// Set the text (trimmed).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidText` if `text` is empty after trimming.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        let text = text.into();
        if non_blank(&text).is_none() {
            return Err(DomainError::InvalidText(EMPTY_TEXT));
        }
        self.0.set_text(text);
        Ok(())
    }

    pub fn set_bloom(&mut self, bloom: impl Into<String>) -> Result<(), DomainError> {
        self.0.set_bloom(bloom)
    }

    pub fn set_bloom_with_verb(
        &mut self,
        bloom: impl Into<String>,
        verb: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.0.set_bloom_with_verb(bloom, verb)
    }

    pub fn set_verb(&mut self, verb: impl Into<String>) -> Result<(), DomainError> {
        self.0.set_verb(verb)
    }

    pub fn map_to(&mut self, mapping: OutcomeMapping) -> usize {
        self.0.map_to(mapping)
    }

    pub fn unmap(&mut self, index: usize) -> Result<OutcomeMapping, DomainError> {
        self.0.unmap(index)
    }

    pub fn add_assessment(&mut self) -> &mut AssessmentPlan {
        self.0.add_assessment()
    }

    pub fn assessment_mut(&mut self, index: usize) -> Option<&mut AssessmentPlan> {
        self.0.assessment_mut(index)
    }

    pub fn remove_assessment(&mut self, index: usize) -> Result<AssessmentPlan, DomainError> {
        self.0.remove_assessment(index)
    }

    pub fn add_strategy(&mut self) -> &mut InstructionalStrategy {
        self.0.add_strategy()
    }

    pub fn strategy_mut(&mut self, index: usize) -> Option<&mut InstructionalStrategy> {
        self.0.strategy_mut(index)
    }

    pub fn remove_strategy(&mut self, index: usize) -> Result<InstructionalStrategy, DomainError> {
        self.0.remove_strategy(index)
    }
}

pub(super) fn check(outcome: &LearningOutcome) -> Result<(), DomainError> {
    match non_blank(outcome.text()) {
        Some(_) => Ok(()),
        None => Err(DomainError::InvalidText(EMPTY_TEXT)),
    }
}

impl Deref for SubmittableLearningOutcome {
    type Target = LearningOutcome;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SubmittableLearningOutcome> for LearningOutcome {
    fn from(outcome: SubmittableLearningOutcome) -> Self {
        outcome.0
    }
}

impl Submit for LearningOutcome {
    type Submitted = SubmittableLearningOutcome;

    fn submit(self) -> Result<Self::Submitted, DomainError> {
        SubmittableLearningOutcome::new(self)
    }
}

impl Submit for SubmittableLearningOutcome {
    type Submitted = Self;

    fn submit(self) -> Result<Self::Submitted, DomainError> {
        Ok(self)
    }
}

impl Instantiate for SubmittableLearningOutcome {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        LearningOutcome::instantiate(bag)?.submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(text: &str) -> LearningOutcome {
        let mut outcome = LearningOutcome::new();
        outcome.set_text(text);
        outcome
    }

    #[test]
    fn rejects_blank_text() {
        assert_eq!(
            SubmittableLearningOutcome::new(outcome("  ")).unwrap_err(),
            DomainError::InvalidText("Text must not be an empty string.")
        );
    }

    #[test]
    fn set_text_is_strict() {
        let mut submitted = outcome("list ports").submit().unwrap();
        assert!(submitted.set_text("   ").is_err());
        assert_eq!(submitted.text(), "list ports");

        submitted.set_text("  name ports ").unwrap();
        assert_eq!(submitted.text(), "name ports");
    }

    #[test]
    fn delegates_keep_taxonomy_rules() {
        let mut submitted = outcome("firewall rules").submit().unwrap();
        submitted.set_bloom_with_verb("apply", "configure").unwrap();
        assert!(submitted.set_verb("define").is_err());
        assert_eq!(submitted.add_assessment().source_bloom(), "apply");
    }

    #[test]
    fn serializes_like_plain_outcome() {
        let plain = outcome("list ports");
        let submitted = plain.clone().submit().unwrap();
        assert_eq!(
            serde_json::to_value(&submitted).unwrap(),
            serde_json::to_value(&plain).unwrap()
        );
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_value::<SubmittableLearningOutcome>(json!({ "text": "" })).is_err());
        let ok: SubmittableLearningOutcome =
            serde_json::from_value(json!({ "text": "recall ports" })).unwrap();
        assert_eq!(ok.text(), "recall ports");
    }
}
