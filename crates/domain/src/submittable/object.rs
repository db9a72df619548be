use std::ops::Deref;

use serde::Serialize;
use serde_json::{Map, Value};

use super::outcome::{check as check_outcome, SubmittableLearningOutcome};
use super::Submit;
use crate::aggregates::{LearningObject, LinkedObject};
use crate::common::non_blank;
use crate::entities::{LearningGoal, User};
use crate::error::DomainError;
use crate::events::StatusChange;
use crate::reconstruction::Instantiate;
use crate::value_objects::{AcademicLevel, LearningObjectLock, Length, Material, Metrics, Status};

const EMPTY_DESCRIPTION: &str = "Description must not be empty";

/// A learning object ready for review.
///
/// # Invariants
///
/// - `description` is non-empty
/// - there is at least one outcome, and every outcome has non-empty text
/// - every embedded child satisfies the same rules
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmittableLearningObject(LearningObject);

impl SubmittableLearningObject {
    /// # Errors
    ///
    /// - `DomainError::InvalidDescription` if the description is empty
    /// - `DomainError::InvalidOutcomes` if there are no outcomes
    /// - `DomainError::InvalidText` if an outcome has empty text
    ///
    /// Children are checked recursively with the same rules.
    pub fn new(object: LearningObject) -> Result<Self, DomainError> {
        check(&object)?;
        Ok(Self(object))
    }

    pub fn into_inner(self) -> LearningObject {
        self.0
    }

    // =========================================================================
    // Strict mutators
    // =========================================================================

    /// # Errors
    ///
    /// Returns `DomainError::InvalidDescription` if `description` is empty
    /// after trimming.
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), DomainError> {
        let description = description.into();
        if non_blank(&description).is_none() {
            return Err(DomainError::InvalidDescription(EMPTY_DESCRIPTION));
        }
        self.0.set_description(description);
        Ok(())
    }

    /// Add an outcome, validating plain outcomes first. Returns its index.
    pub fn add_outcome<O>(&mut self, outcome: O) -> Result<usize, DomainError>
    where
        O: Submit<Submitted = SubmittableLearningOutcome>,
    {
        let outcome = outcome.submit()?;
        Ok(self.0.add_outcome(outcome.into_inner()))
    }

    /// # Errors
    ///
    /// Returns `DomainError::InvalidOutcomes` when removing the last outcome.
    pub fn remove_outcome(&mut self, index: usize) -> Result<SubmittableLearningOutcome, DomainError> {
        if self.0.outcomes().len() <= 1 {
            return Err(DomainError::InvalidOutcomes);
        }
        self.0.remove_outcome(index).map(SubmittableLearningOutcome::trusted)
    }

    /// Edit outcome `index` through its strict API. The edit is applied only
    /// if `edit` succeeds.
    pub fn update_outcome<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut SubmittableLearningOutcome) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let len = self.0.outcomes().len();
        let current = self
            .0
            .outcomes()
            .get(index)
            .ok_or_else(|| DomainError::index_out_of_range("outcomes", index, len))?;
        let mut outcome = SubmittableLearningOutcome::trusted(current.clone());
        let result = edit(&mut outcome)?;
        if let Some(slot) = self.0.outcome_mut(index) {
            *slot = outcome.into_inner();
        }
        Ok(result)
    }

    /// Add a child, validating plain objects first. Returns its index.
    pub fn add_child<C>(&mut self, child: C) -> Result<usize, DomainError>
    where
        C: Submit<Submitted = SubmittableLearningObject>,
    {
        let child = child.submit()?;
        Ok(self.0.add_child(child.into_inner()))
    }

    /// Remove child `index`. An embedded child removed here satisfies the
    /// submittable rules.
    pub fn remove_child(&mut self, index: usize) -> Result<LinkedObject, DomainError> {
        self.0.remove_child(index)
    }

    /// Edit child `index` through its strict API. The edit is applied only
    /// if `edit` succeeds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidChild` if the child is an unresolved
    /// reference.
    pub fn update_child<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut SubmittableLearningObject) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let len = self.0.children().len();
        let current = self
            .0
            .children()
            .get(index)
            .ok_or_else(|| DomainError::index_out_of_range("children", index, len))?
            .object()
            .ok_or(DomainError::InvalidChild)?;
        let mut child = Self(current.clone());
        let result = edit(&mut child)?;
        if let Some(slot) = self.0.child_mut(index) {
            *slot = child.into_inner();
        }
        Ok(result)
    }

    /// Replace a pending child reference with the loaded child.
    pub fn resolve_child<C>(&mut self, child: C) -> Result<usize, DomainError>
    where
        C: Submit<Submitted = SubmittableLearningObject>,
    {
        let child = child.submit()?;
        self.0.resolve_child(child.into_inner())
    }

    // =========================================================================
    // Delegated mutators
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.0.set_name(name)
    }

    pub fn set_length(&mut self, length: Length) -> Result<(), DomainError> {
        self.0.set_length(length)
    }

    pub fn add_level(&mut self, level: AcademicLevel) -> Result<usize, DomainError> {
        self.0.add_level(level)
    }

    pub fn remove_level(&mut self, index: usize) -> Result<AcademicLevel, DomainError> {
        self.0.remove_level(index)
    }

    pub fn set_levels(&mut self, levels: Vec<AcademicLevel>) -> Result<(), DomainError> {
        self.0.set_levels(levels)
    }

    pub fn add_goal(&mut self, text: impl Into<String>) -> usize {
        self.0.add_goal(text)
    }

    pub fn goal_mut(&mut self, index: usize) -> Option<&mut LearningGoal> {
        self.0.goal_mut(index)
    }

    pub fn remove_goal(&mut self, index: usize) -> Result<LearningGoal, DomainError> {
        self.0.remove_goal(index)
    }

    pub fn set_materials(&mut self, materials: Material) {
        self.0.set_materials(materials);
    }

    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.0.set_metrics(metrics);
    }

    pub fn publish(&mut self) {
        self.0.publish();
    }

    pub fn unpublish(&mut self) -> Result<(), DomainError> {
        self.0.unpublish()
    }

    pub fn set_status(&mut self, status: Status) -> StatusChange {
        self.0.set_status(status)
    }

    pub fn add_contributor(&mut self, contributor: User) -> usize {
        self.0.add_contributor(contributor)
    }

    pub fn remove_contributor(&mut self, index: usize) -> Result<User, DomainError> {
        self.0.remove_contributor(index)
    }

    pub fn set_lock(&mut self, lock: Option<LearningObjectLock>) {
        self.0.set_lock(lock);
    }

    pub fn set_collection(&mut self, collection: impl Into<String>) {
        self.0.set_collection(collection);
    }
}

fn check(object: &LearningObject) -> Result<(), DomainError> {
    if non_blank(object.description()).is_none() {
        return Err(DomainError::InvalidDescription(EMPTY_DESCRIPTION));
    }
    if object.outcomes().is_empty() {
        return Err(DomainError::InvalidOutcomes);
    }
    object.outcomes().iter().try_for_each(check_outcome)?;
    object
        .children()
        .iter()
        .filter_map(LinkedObject::object)
        .try_for_each(check)
}

impl Deref for SubmittableLearningObject {
    type Target = LearningObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SubmittableLearningObject> for LearningObject {
    fn from(object: SubmittableLearningObject) -> Self {
        object.0
    }
}

impl Submit for LearningObject {
    type Submitted = SubmittableLearningObject;

    fn submit(self) -> Result<Self::Submitted, DomainError> {
        SubmittableLearningObject::new(self)
    }
}

impl Submit for SubmittableLearningObject {
    type Submitted = Self;

    fn submit(self) -> Result<Self::Submitted, DomainError> {
        Ok(self)
    }
}

impl Instantiate for SubmittableLearningObject {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        LearningObject::instantiate(bag)?.submit()
    }
}
