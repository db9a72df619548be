//! Learning outcomes
//!
//! # Invariants
//!
//! - `bloom` is always a registered taxon
//! - `verb` is always in the verb set of the *current* `bloom`; a taxon change
//!   that would strand the verb is rejected (use
//!   [`LearningOutcome::set_bloom_with_verb`] to move both at once)
//! - assessment plans and strategies are owned exclusively by this outcome

use serde::{Serialize, Serializer};

use crate::common::trimmed;
use crate::entities::{AssessmentPlan, InstructionalStrategy};
use crate::error::{remove_at, DomainError};
use crate::reconstruction::schema::LEARNING_OUTCOME;
use crate::reconstruction::write::WriteBack;
use crate::reconstruction::Extensions;
use crate::taxonomy::taxonomy;
use crate::value_objects::OutcomeMapping;

/// What a student should be able to do after completing a learning object,
/// phrased as a Bloom verb followed by free text.
///
/// # Example
///
/// ```
/// use clark_domain::entities::LearningOutcome;
///
/// let mut outcome = LearningOutcome::new();
/// outcome.set_bloom_with_verb("apply", "configure").unwrap();
/// outcome.set_text("a stateful firewall");
///
/// assert_eq!(outcome.outcome(), "configure a stateful firewall");
/// assert_eq!(outcome.add_assessment().source_bloom(), "apply");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LearningOutcome {
    tag: u32,
    bloom: String,
    verb: String,
    text: String,
    mappings: Vec<OutcomeMapping>,
    assessments: Vec<AssessmentPlan>,
    strategies: Vec<InstructionalStrategy>,
    extensions: Extensions,
}

impl LearningOutcome {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a blank outcome under the first registered taxon and its first verb.
    pub fn new() -> Self {
        let taxon = taxonomy().default_bloom();
        Self {
            tag: 0,
            bloom: taxon.name().to_string(),
            verb: taxon.default_verb().to_string(),
            text: String::new(),
            mappings: Vec::new(),
            assessments: Vec::new(),
            strategies: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Identifier unique among the outcomes of the owning learning object.
    #[inline]
    pub fn tag(&self) -> u32 {
        self.tag
    }

    #[inline]
    pub fn bloom(&self) -> &str {
        &self.bloom
    }

    #[inline]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The full outcome statement: verb and text.
    pub fn outcome(&self) -> String {
        format!("{} {}", self.verb, self.text)
    }

    pub fn mappings(&self) -> &[OutcomeMapping] {
        &self.mappings
    }

    pub fn assessments(&self) -> &[AssessmentPlan] {
        &self.assessments
    }

    pub fn strategies(&self) -> &[InstructionalStrategy] {
        &self.strategies
    }

    pub fn assessment_mut(&mut self, index: usize) -> Option<&mut AssessmentPlan> {
        self.assessments.get_mut(index)
    }

    pub fn strategy_mut(&mut self, index: usize) -> Option<&mut InstructionalStrategy> {
        self.strategies.get_mut(index)
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    // =========================================================================
    // Builder Methods (used when loading from storage)
    // =========================================================================

    /// Set the outcome's tag.
    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = tag;
        self
    }

    pub(crate) fn set_tag(&mut self, tag: u32) {
        self.tag = tag;
    }

    pub(crate) fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub(crate) fn push_assessment(&mut self, plan: AssessmentPlan) {
        self.assessments.push(plan);
    }

    pub(crate) fn push_strategy(&mut self, strategy: InstructionalStrategy) {
        self.strategies.push(strategy);
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    /// Change the taxon, keeping the current verb.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidBloom` if `bloom` is not registered
    /// - `DomainError::InvalidVerb` if the current verb is not valid for `bloom`
    pub fn set_bloom(&mut self, bloom: impl Into<String>) -> Result<(), DomainError> {
        let bloom = bloom.into();
        let taxon = taxonomy().require_bloom(&bloom)?;
        if !taxon.has_verb(&self.verb) {
            return Err(DomainError::invalid_verb(bloom, self.verb.clone()));
        }
        self.bloom = bloom;
        Ok(())
    }

    /// Change taxon and verb together, validating the verb against the new taxon.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidBloom` if `bloom` is not registered
    /// - `DomainError::InvalidVerb` if `verb` is not valid for `bloom`
    pub fn set_bloom_with_verb(
        &mut self,
        bloom: impl Into<String>,
        verb: impl Into<String>,
    ) -> Result<(), DomainError> {
        let (bloom, verb) = (bloom.into(), verb.into());
        let taxon = taxonomy().require_bloom(&bloom)?;
        if !taxon.has_verb(&verb) {
            return Err(DomainError::invalid_verb(bloom, verb));
        }
        self.bloom = bloom;
        self.verb = verb;
        Ok(())
    }

    /// Set the verb.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVerb` unless `verb` belongs to the current taxon.
    pub fn set_verb(&mut self, verb: impl Into<String>) -> Result<(), DomainError> {
        let verb = verb.into();
        let valid = taxonomy()
            .bloom(&self.bloom)
            .is_some_and(|t| t.has_verb(&verb));
        if !valid {
            return Err(DomainError::invalid_verb(self.bloom.clone(), verb));
        }
        self.verb = verb;
        Ok(())
    }

    /// Set the outcome text (trimmed). Empty text is allowed on drafts.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = trimmed(text.into());
    }

    /// Map another outcome to this one. Returns the mapping's index.
    pub fn map_to(&mut self, mapping: OutcomeMapping) -> usize {
        self.mappings.push(mapping);
        self.mappings.len() - 1
    }

    /// Remove and return the mapping at `index`.
    pub fn unmap(&mut self, index: usize) -> Result<OutcomeMapping, DomainError> {
        remove_at(&mut self.mappings, index, "mappings")
    }

    /// Append a blank assessment plan seeded with the current taxon and return it.
    pub fn add_assessment(&mut self) -> &mut AssessmentPlan {
        let plan = match taxonomy().bloom(&self.bloom) {
            Some(taxon) => AssessmentPlan::seeded(taxon),
            None => AssessmentPlan::seeded(taxonomy().default_bloom()),
        };
        self.assessments.push(plan);
        let last = self.assessments.len() - 1;
        &mut self.assessments[last]
    }

    pub fn remove_assessment(&mut self, index: usize) -> Result<AssessmentPlan, DomainError> {
        remove_at(&mut self.assessments, index, "assessments")
    }

    /// Append a blank instructional strategy seeded with the current taxon and return it.
    pub fn add_strategy(&mut self) -> &mut InstructionalStrategy {
        let strategy = match taxonomy().bloom(&self.bloom) {
            Some(taxon) => InstructionalStrategy::seeded(taxon),
            None => InstructionalStrategy::seeded(taxonomy().default_bloom()),
        };
        self.strategies.push(strategy);
        let last = self.strategies.len() - 1;
        &mut self.strategies[last]
    }

    pub fn remove_strategy(&mut self, index: usize) -> Result<InstructionalStrategy, DomainError> {
        remove_at(&mut self.strategies, index, "strategies")
    }
}

impl Default for LearningOutcome {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Wire format; `outcome` is derived and recomputed on every write
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LearningOutcomeWireFormat<'a> {
    tag: u32,
    bloom: &'a str,
    verb: &'a str,
    text: &'a str,
    outcome: String,
    mappings: &'a [OutcomeMapping],
    assessments: &'a [AssessmentPlan],
    strategies: &'a [InstructionalStrategy],
    #[serde(flatten)]
    extensions: &'a Extensions,
}

impl Serialize for LearningOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let write_back = WriteBack::new(&LEARNING_OUTCOME, &self.extensions);
        let wire = LearningOutcomeWireFormat {
            tag: self.tag,
            bloom: &self.bloom,
            verb: &self.verb,
            text: &self.text,
            outcome: self.outcome(),
            mappings: &self.mappings,
            assessments: &self.assessments,
            strategies: &self.strategies,
            extensions: write_back.extensions(),
        };
        write_back.write(wire, serializer)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn verb_is_valid(outcome: &LearningOutcome) -> bool {
        taxonomy()
            .verbs_for(outcome.bloom())
            .is_some_and(|verbs| verbs.iter().any(|v| v == outcome.verb()))
    }

    mod constructor {
        use super::*;

        #[test]
        fn new_uses_first_taxon_and_verb() {
            let outcome = LearningOutcome::new();
            let taxon = taxonomy().default_bloom();
            assert_eq!(outcome.bloom(), taxon.name());
            assert_eq!(outcome.verb(), taxon.default_verb());
            assert_eq!(outcome.text(), "");
            assert_eq!(outcome.tag(), 0);
            assert!(verb_is_valid(&outcome));
        }
    }

    mod taxonomy_rules {
        use super::*;

        #[test]
        fn set_bloom_rejects_unknown_taxon() {
            let mut outcome = LearningOutcome::new();
            assert_eq!(
                outcome.set_bloom("memorize").unwrap_err(),
                DomainError::InvalidBloom("memorize".into())
            );
        }

        #[test]
        fn set_bloom_refuses_to_strand_verb() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("remember", "define").unwrap();

            let err = outcome.set_bloom("apply").unwrap_err();
            assert_eq!(err, DomainError::invalid_verb("apply", "define"));
            assert_eq!(outcome.bloom(), "remember");
            assert!(verb_is_valid(&outcome));
        }

        #[test]
        fn set_bloom_with_verb_moves_both() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("understand", "compare").unwrap();
            outcome.set_bloom_with_verb("apply", "demonstrate").unwrap();
            assert_eq!(outcome.bloom(), "apply");
            assert_eq!(outcome.verb(), "demonstrate");
        }

        #[test]
        fn set_verb_checks_current_bloom() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("apply", "implement").unwrap();
            outcome.set_verb("configure").unwrap();
            assert_eq!(
                outcome.set_verb("define").unwrap_err(),
                DomainError::invalid_verb("apply", "define")
            );
            assert_eq!(outcome.verb(), "configure");
        }

        #[test]
        fn set_bloom_with_verb_is_atomic() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("apply", "implement").unwrap();
            assert!(outcome.set_bloom_with_verb("create", "implement").is_err());
            assert_eq!(outcome.bloom(), "apply");
            assert_eq!(outcome.verb(), "implement");
        }
    }

    mod text {
        use super::*;

        #[test]
        fn set_text_trims_and_allows_empty() {
            let mut outcome = LearningOutcome::new();
            outcome.set_text("  list the OSI layers ");
            assert_eq!(outcome.text(), "list the OSI layers");
            outcome.set_text("   ");
            assert_eq!(outcome.text(), "");
        }

        #[test]
        fn outcome_joins_verb_and_text() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("remember", "list").unwrap();
            outcome.set_text("the OSI layers");
            assert_eq!(outcome.outcome(), "list the OSI layers");
        }
    }

    mod children {
        use super::*;

        #[test]
        fn add_assessment_is_seeded_with_current_bloom() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("apply", "solve").unwrap();

            let plan = outcome.add_assessment();
            assert_eq!(plan.source_bloom(), "apply");
            assert!(plan.set_plan("essay").is_err());
            plan.set_plan("practical").unwrap();
            plan.set_text("Configure a VLAN");

            assert_eq!(outcome.assessments().len(), 1);
            assert_eq!(outcome.assessments()[0].plan(), "practical");
        }

        #[test]
        fn plans_keep_their_source_bloom() {
            let mut outcome = LearningOutcome::new();
            outcome.set_bloom_with_verb("apply", "solve").unwrap();
            outcome.add_assessment();
            outcome.set_bloom_with_verb("create", "design").unwrap();

            let plan = outcome.assessment_mut(0).unwrap();
            assert_eq!(plan.source_bloom(), "apply");
            plan.set_plan("simulation").unwrap();
        }

        #[test]
        fn add_and_remove_strategies() {
            let mut outcome = LearningOutcome::new();
            outcome.add_strategy().set_text("Walk through an example");
            outcome.add_strategy();
            assert_eq!(outcome.strategies().len(), 2);

            let removed = outcome.remove_strategy(0).unwrap();
            assert_eq!(removed.text(), "Walk through an example");
            assert!(matches!(
                outcome.remove_strategy(5),
                Err(DomainError::IndexOutOfRange { collection: "strategies", .. })
            ));
        }

        #[test]
        fn remove_assessment_returns_plan() {
            let mut outcome = LearningOutcome::new();
            outcome.add_assessment().set_text("quiz one");
            assert_eq!(outcome.remove_assessment(0).unwrap().text(), "quiz one");
            assert!(outcome.assessments().is_empty());
        }

        #[test]
        fn map_and_unmap() {
            let mut outcome = LearningOutcome::new();
            let idx = outcome.map_to(OutcomeMapping::standard("NCWF", "K0027", "2017", "os"));
            assert_eq!(idx, 0);
            assert_eq!(outcome.map_to(OutcomeMapping::default()), 1);
            assert_eq!(outcome.unmap(0).unwrap().name, "K0027");
            assert_eq!(outcome.mappings().len(), 1);
            assert!(outcome.unmap(3).is_err());
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn serializes_derived_outcome() {
            let mut outcome = LearningOutcome::new().with_tag(3);
            outcome.set_bloom_with_verb("analyze", "examine").unwrap();
            outcome.set_text("packet captures");
            let json = serde_json::to_value(&outcome).unwrap();
            assert_eq!(json["tag"], 3);
            assert_eq!(json["outcome"], "examine packet captures");
            assert!(json["assessments"].as_array().unwrap().is_empty());
        }
    }
}
