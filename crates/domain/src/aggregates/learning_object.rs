//! LearningObject aggregate - an authorable unit of instruction
//!
//! Owns its goals, outcomes (and through them every assessment plan and
//! instructional strategy), materials and child learning objects. Authors
//! and contributors are embedded by value but owned by the account system.
//!
//! Every mutating method validates its input, refreshes `date`, and leaves
//! the aggregate unchanged on error.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::linked::{reference_position, LinkedObject};
use crate::common::datetime::serialize_epoch_millis;
use crate::common::{now_millis, to_epoch_millis_string, trimmed};
use crate::entities::{LearningGoal, LearningOutcome, User};
use crate::error::{remove_at, DomainError};
use crate::events::StatusChange;
use crate::ids::LearningObjectId;
use crate::reconstruction::schema::LEARNING_OBJECT;
use crate::reconstruction::write::WriteBack;
use crate::reconstruction::Extensions;
use crate::taxonomy::taxonomy;
use crate::value_objects::{
    AcademicLevel, LearningObjectLock, Length, Material, Metrics, OutcomeMapping, Status,
};

/// An authorable learning object.
///
/// # Invariants
///
/// - `name` is empty only while unset; once set it is non-empty and trimmed
/// - `length` is registered in the installed taxonomy; blank objects take
///   the first registered length
/// - `levels` is never empty and holds no duplicates
/// - outcome tags are unique within the object
/// - `status == Released` implies `published`
///
/// # Example
///
/// ```
/// use clark_domain::aggregates::LearningObject;
/// use clark_domain::value_objects::{AcademicLevel, Status};
///
/// let mut object = LearningObject::new();
/// object.set_name("Intro to Firewalls").unwrap();
/// object.add_level(AcademicLevel::Graduate).unwrap();
/// object.set_status(Status::Released);
///
/// assert_eq!(object.levels().len(), 2);
/// assert!(object.published());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LearningObject {
    // Identity (assigned by storage)
    id: Option<LearningObjectId>,
    author: User,

    // Descriptive
    name: String,
    description: String,
    date: DateTime<Utc>,
    length: Length,
    levels: Vec<AcademicLevel>,

    // Instructional content
    goals: Vec<LearningGoal>,
    outcomes: Vec<LearningOutcome>,
    next_outcome_tag: u32,
    materials: Material,
    metrics: Metrics,

    // Publication
    published: bool,
    status: Status,

    // Relationships
    children: Vec<LinkedObject>,
    contributors: Vec<User>,
    lock: Option<LearningObjectLock>,
    collection: String,

    extensions: Extensions,
}

impl LearningObject {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a blank learning object with a blank author.
    pub fn new() -> Self {
        Self::with_author(User::default())
    }

    /// Create a blank learning object authored by `author`.
    pub fn with_author(author: User) -> Self {
        Self {
            id: None,
            author,
            name: String::new(),
            description: String::new(),
            date: now_millis(),
            length: taxonomy().default_length(),
            levels: vec![AcademicLevel::Undergraduate],
            goals: Vec::new(),
            outcomes: Vec::new(),
            next_outcome_tag: 0,
            materials: Material::default(),
            metrics: Metrics::default(),
            published: false,
            status: Status::default(),
            children: Vec::new(),
            contributors: Vec::new(),
            lock: None,
            collection: String::new(),
            extensions: Extensions::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> Option<&LearningObjectId> {
        self.id.as_ref()
    }

    #[inline]
    pub fn author(&self) -> &User {
        &self.author
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Last-modified timestamp.
    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[inline]
    pub fn length(&self) -> Length {
        self.length
    }

    pub fn levels(&self) -> &[AcademicLevel] {
        &self.levels
    }

    pub fn goals(&self) -> &[LearningGoal] {
        &self.goals
    }

    pub fn goal_mut(&mut self, index: usize) -> Option<&mut LearningGoal> {
        let goal = self.goals.get_mut(index)?;
        self.date = now_millis();
        Some(goal)
    }

    pub fn outcomes(&self) -> &[LearningOutcome] {
        &self.outcomes
    }

    /// Mutable access to one outcome. The outcome enforces its own invariants.
    pub fn outcome_mut(&mut self, index: usize) -> Option<&mut LearningOutcome> {
        let outcome = self.outcomes.get_mut(index)?;
        self.date = now_millis();
        Some(outcome)
    }

    pub fn materials(&self) -> &Material {
        &self.materials
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[inline]
    pub fn published(&self) -> bool {
        self.published
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Children in stored order, embedded or by reference.
    pub fn children(&self) -> &[LinkedObject] {
        &self.children
    }

    /// The embedded child at `index`; `None` for a reference.
    pub fn child(&self, index: usize) -> Option<&LearningObject> {
        self.children.get(index)?.object()
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut LearningObject> {
        let child = self.children.get_mut(index)?.object_mut()?;
        self.date = now_millis();
        Some(child)
    }

    /// Child ids read from storage whose objects were not embedded.
    pub fn child_refs(&self) -> impl Iterator<Item = &LearningObjectId> {
        self.children.iter().filter_map(LinkedObject::reference)
    }

    pub fn contributors(&self) -> &[User] {
        &self.contributors
    }

    pub fn lock(&self) -> Option<&LearningObjectLock> {
        self.lock.as_ref()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persisted fields this crate does not model.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    // =========================================================================
    // Builder Methods (used when loading from storage)
    // =========================================================================

    pub fn with_id(mut self, id: LearningObjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the last-modified timestamp.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub(crate) fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub(crate) fn set_author(&mut self, author: User) {
        self.author = author;
    }

    pub(crate) fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    // =========================================================================
    // Descriptive fields
    // =========================================================================

    /// Set the name (trimmed).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidName` if `name` is empty after trimming.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = trimmed(name.into());
        if name.is_empty() {
            return Err(DomainError::InvalidName);
        }
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Set the description (trimmed). Empty descriptions are allowed on drafts.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = trimmed(description.into());
        self.touch();
    }

    /// # Errors
    ///
    /// Returns `DomainError::InvalidLength` if the installed taxonomy does not
    /// register `length`.
    pub fn set_length(&mut self, length: Length) -> Result<(), DomainError> {
        if !taxonomy().has_length(length.as_str()) {
            return Err(DomainError::InvalidLength(length.to_string()));
        }
        self.length = length;
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Levels
    // =========================================================================

    /// Add an academic level. Returns its index.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LevelExists` if the level is already present.
    pub fn add_level(&mut self, level: AcademicLevel) -> Result<usize, DomainError> {
        if self.levels.contains(&level) {
            return Err(DomainError::LevelExists(level.to_string()));
        }
        self.levels.push(level);
        self.touch();
        Ok(self.levels.len() - 1)
    }

    /// Remove and return the level at `index`.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidLevels` if it is the only level
    /// - `DomainError::IndexOutOfRange` if `index` is past the end
    pub fn remove_level(&mut self, index: usize) -> Result<AcademicLevel, DomainError> {
        if self.levels.len() <= 1 {
            return Err(DomainError::InvalidLevels);
        }
        let level = remove_at(&mut self.levels, index, "levels")?;
        self.touch();
        Ok(level)
    }

    /// Replace all levels.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidLevels` if `levels` is empty
    /// - `DomainError::LevelExists` if a level repeats
    pub fn set_levels(&mut self, levels: Vec<AcademicLevel>) -> Result<(), DomainError> {
        if levels.is_empty() {
            return Err(DomainError::InvalidLevels);
        }
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].contains(level) {
                return Err(DomainError::LevelExists(level.to_string()));
            }
        }
        self.levels = levels;
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Goals
    // =========================================================================

    /// Add a goal with the given text. Returns its index.
    pub fn add_goal(&mut self, text: impl Into<String>) -> usize {
        self.push_goal(LearningGoal::new(text))
    }

    pub(crate) fn push_goal(&mut self, goal: LearningGoal) -> usize {
        self.goals.push(goal);
        self.touch();
        self.goals.len() - 1
    }

    pub fn remove_goal(&mut self, index: usize) -> Result<LearningGoal, DomainError> {
        let goal = remove_at(&mut self.goals, index, "goals")?;
        self.touch();
        Ok(goal)
    }

    // =========================================================================
    // Outcomes
    // =========================================================================

    /// Add an outcome, assigning it the next free tag. Returns its index.
    pub fn add_outcome(&mut self, mut outcome: LearningOutcome) -> usize {
        outcome.set_tag(self.take_outcome_tag());
        self.outcomes.push(outcome);
        self.touch();
        self.outcomes.len() - 1
    }

    /// Add a blank outcome and return it for editing.
    pub fn add_blank_outcome(&mut self) -> &mut LearningOutcome {
        let index = self.add_outcome(LearningOutcome::new());
        &mut self.outcomes[index]
    }

    pub fn remove_outcome(&mut self, index: usize) -> Result<LearningOutcome, DomainError> {
        let outcome = remove_at(&mut self.outcomes, index, "outcomes")?;
        self.touch();
        Ok(outcome)
    }

    /// Add an outcome loaded from storage, keeping its persisted tag unless
    /// it is missing or already taken.
    pub(crate) fn restore_outcome(&mut self, mut outcome: LearningOutcome, tagged: bool) {
        let tag = outcome.tag();
        let taken = self.outcomes.iter().any(|o| o.tag() == tag);
        if !tagged || taken {
            if taken {
                tracing::warn!(tag, "Duplicate outcome tag in stored learning object, re-tagging");
            }
            outcome.set_tag(self.take_outcome_tag());
        } else {
            self.next_outcome_tag = self.next_outcome_tag.max(tag.saturating_add(1));
        }
        self.outcomes.push(outcome);
    }

    /// A mapping that lets another outcome reference outcome `index` of this object.
    pub fn outcome_reference(&self, index: usize) -> Option<OutcomeMapping> {
        let outcome = self.outcomes.get(index)?;
        let mut mapping = OutcomeMapping::standard(
            self.author.name(),
            self.name.clone(),
            to_epoch_millis_string(&self.date),
            outcome.outcome(),
        )
        .with_tag(outcome.tag());
        if let Some(id) = &self.id {
            mapping = mapping.with_id(id.as_str());
        }
        Some(mapping)
    }

    fn take_outcome_tag(&mut self) -> u32 {
        let tag = self.next_outcome_tag;
        self.next_outcome_tag = self.next_outcome_tag.saturating_add(1);
        tag
    }

    // =========================================================================
    // Materials and metrics
    // =========================================================================

    pub fn set_materials(&mut self, materials: Material) {
        self.materials = materials;
        self.touch();
    }

    /// Replace the usage counters. Counters are not content, so `date` is kept.
    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.metrics = metrics;
    }

    // =========================================================================
    // Publication
    // =========================================================================

    pub fn publish(&mut self) {
        self.published = true;
        self.touch();
    }

    /// Clear the published flag.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` while the object is released.
    pub fn unpublish(&mut self) -> Result<(), DomainError> {
        if self.status == Status::Released {
            return Err(DomainError::invalid_transition(
                "a released learning object cannot be unpublished",
            ));
        }
        self.published = false;
        self.touch();
        Ok(())
    }

    /// Move to `status`. Entering `Released` also publishes the object.
    pub fn set_status(&mut self, status: Status) -> StatusChange {
        let from = self.status;
        self.status = status;
        if status == Status::Released {
            self.published = true;
        }
        self.touch();

        let change = if from == status {
            StatusChange::Unchanged { status }
        } else if status == Status::Released {
            StatusChange::Released { from }
        } else {
            StatusChange::Changed { from, to: status }
        };
        tracing::debug!(from = %from, to = %status, "Learning object status set");
        change
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Add an owned child learning object. Returns its index.
    pub fn add_child(&mut self, child: LearningObject) -> usize {
        self.children.push(LinkedObject::Embedded(child));
        self.touch();
        self.children.len() - 1
    }

    /// Add a child by id, to be resolved later with [`Self::resolve_child`].
    /// Returns its index.
    pub fn add_child_ref(&mut self, id: LearningObjectId) -> usize {
        self.children.push(LinkedObject::Reference(id));
        self.touch();
        self.children.len() - 1
    }

    pub fn remove_child(&mut self, index: usize) -> Result<LinkedObject, DomainError> {
        let child = remove_at(&mut self.children, index, "children")?;
        self.touch();
        Ok(child)
    }

    /// Replace a pending child reference, in place, with the loaded child
    /// object. Returns the child's index.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidChild` if the child has no id or its id
    /// is not among the pending references.
    pub fn resolve_child(&mut self, child: LearningObject) -> Result<usize, DomainError> {
        let position =
            reference_position(&self.children, &child).ok_or(DomainError::InvalidChild)?;
        self.children[position] = LinkedObject::Embedded(child);
        self.touch();
        Ok(position)
    }

    // =========================================================================
    // Contributors, lock and collection
    // =========================================================================

    pub fn add_contributor(&mut self, contributor: User) -> usize {
        self.contributors.push(contributor);
        self.touch();
        self.contributors.len() - 1
    }

    pub fn remove_contributor(&mut self, index: usize) -> Result<User, DomainError> {
        let contributor = remove_at(&mut self.contributors, index, "contributors")?;
        self.touch();
        Ok(contributor)
    }

    /// Set or clear the lock.
    pub fn set_lock(&mut self, lock: Option<LearningObjectLock>) {
        self.lock = lock;
        self.touch();
    }

    pub fn set_collection(&mut self, collection: impl Into<String>) {
        self.collection = collection.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.date = now_millis();
    }
}

impl Default for LearningObject {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the wire format
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LearningObjectWireFormat<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a LearningObjectId>,
    author: &'a User,
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    description: &'a str,
    #[serde(serialize_with = "serialize_epoch_millis")]
    date: DateTime<Utc>,
    length: Length,
    levels: &'a [AcademicLevel],
    goals: &'a [LearningGoal],
    outcomes: &'a [LearningOutcome],
    materials: &'a Material,
    metrics: &'a Metrics,
    published: bool,
    status: Status,
    children: &'a [LinkedObject],
    contributors: &'a [User],
    #[serde(skip_serializing_if = "Option::is_none")]
    lock: Option<&'a LearningObjectLock>,
    collection: &'a str,
    #[serde(flatten)]
    extensions: &'a Extensions,
}

impl Serialize for LearningObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let write_back = WriteBack::new(&LEARNING_OBJECT, &self.extensions);
        let wire = LearningObjectWireFormat {
            id: self.id.as_ref(),
            author: &self.author,
            name: &self.name,
            description: &self.description,
            date: self.date,
            length: self.length,
            levels: &self.levels,
            goals: &self.goals,
            outcomes: &self.outcomes,
            materials: &self.materials,
            metrics: &self.metrics,
            published: self.published,
            status: self.status,
            children: &self.children,
            contributors: &self.contributors,
            lock: self.lock.as_ref(),
            collection: &self.collection,
            extensions: write_back.extensions(),
        };
        write_back.write(wire, serializer)
    }
}

// ============================================================================
// Tests
// ============================================================================
