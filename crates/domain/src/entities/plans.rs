//! Assessment plans and instructional strategies
//!
//! Both belong to exactly one learning outcome and remember the outcome's Bloom
//! taxon from the moment they were created (`source_bloom`). Their kind field
//! is validated against that taxon on every assignment. Changing the outcome's
//! taxon later does not revalidate existing plans or strategies; a plan created
//! under `apply` keeps `apply` as its source.

use serde::{Serialize, Serializer};

use crate::error::DomainError;
use crate::reconstruction::schema::{ASSESSMENT_PLAN, INSTRUCTIONAL_STRATEGY};
use crate::reconstruction::write::WriteBack;
use crate::reconstruction::Extensions;
use crate::taxonomy::{taxonomy, BloomTaxon};

/// How achievement of an outcome will be assessed (essay, lab exercise, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentPlan {
    source_bloom: String,
    plan: String,
    text: String,
    extensions: Extensions,
}

impl AssessmentPlan {
    /// Create a blank plan for a taxon, seeded with its first assessment class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBloom` if `source_bloom` is not registered.
    pub fn new(source_bloom: &str) -> Result<Self, DomainError> {
        Ok(Self::seeded(taxonomy().require_bloom(source_bloom)?))
    }

    pub(crate) fn seeded(taxon: &BloomTaxon) -> Self {
        Self {
            source_bloom: taxon.name().to_string(),
            plan: taxon.default_assessment().to_string(),
            text: String::new(),
            extensions: Extensions::new(),
        }
    }

    /// The owning outcome's taxon at creation time.
    pub fn source_bloom(&self) -> &str {
        &self.source_bloom
    }

    pub fn plan(&self) -> &str {
        &self.plan
    }

    /// Set the assessment class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPlan` unless `plan` is registered for the
    /// plan's source taxon.
    pub fn set_plan(&mut self, plan: impl Into<String>) -> Result<(), DomainError> {
        let plan = plan.into();
        let valid = taxonomy()
            .bloom(&self.source_bloom)
            .is_some_and(|t| t.has_assessment(&plan));
        if !valid {
            return Err(DomainError::InvalidPlan {
                bloom: self.source_bloom.clone(),
                plan,
            });
        }
        self.plan = plan;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub(crate) fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }
}

/// How an outcome will be taught (lecture, lab, case study, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionalStrategy {
    source_bloom: String,
    instruction: String,
    text: String,
    extensions: Extensions,
}

impl InstructionalStrategy {
    /// Create a blank strategy for a taxon, seeded with its first instruction class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBloom` if `source_bloom` is not registered.
    pub fn new(source_bloom: &str) -> Result<Self, DomainError> {
        Ok(Self::seeded(taxonomy().require_bloom(source_bloom)?))
    }

    pub(crate) fn seeded(taxon: &BloomTaxon) -> Self {
        Self {
            source_bloom: taxon.name().to_string(),
            instruction: taxon.default_instruction().to_string(),
            text: String::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn source_bloom(&self) -> &str {
        &self.source_bloom
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Set the instruction class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInstruction` unless `instruction` is
    /// registered for the strategy's source taxon.
    pub fn set_instruction(&mut self, instruction: impl Into<String>) -> Result<(), DomainError> {
        let instruction = instruction.into();
        let valid = taxonomy()
            .bloom(&self.source_bloom)
            .is_some_and(|t| t.has_instruction(&instruction));
        if !valid {
            return Err(DomainError::InvalidInstruction {
                bloom: self.source_bloom.clone(),
                instruction,
            });
        }
        self.instruction = instruction;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub(crate) fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssessmentPlanWireFormat<'a> {
    source_bloom: &'a str,
    plan: &'a str,
    text: &'a str,
    #[serde(flatten)]
    extensions: &'a Extensions,
}

impl Serialize for AssessmentPlan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let write_back = WriteBack::new(&ASSESSMENT_PLAN, &self.extensions);
        let wire = AssessmentPlanWireFormat {
            source_bloom: &self.source_bloom,
            plan: &self.plan,
            text: &self.text,
            extensions: write_back.extensions(),
        };
        write_back.write(wire, serializer)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionalStrategyWireFormat<'a> {
    source_bloom: &'a str,
    instruction: &'a str,
    text: &'a str,
    #[serde(flatten)]
    extensions: &'a Extensions,
}

impl Serialize for InstructionalStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let write_back = WriteBack::new(&INSTRUCTIONAL_STRATEGY, &self.extensions);
        let wire = InstructionalStrategyWireFormat {
            source_bloom: &self.source_bloom,
            instruction: &self.instruction,
            text: &self.text,
            extensions: write_back.extensions(),
        };
        write_back.write(wire, serializer)
    }
}
