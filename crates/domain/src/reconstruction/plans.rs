use serde_json::{Map, Value};

use super::bag::PropertyBag;
use super::schema::{ASSESSMENT_PLAN, INSTRUCTIONAL_STRATEGY};
use super::Instantiate;
use crate::entities::{AssessmentPlan, InstructionalStrategy};
use crate::error::DomainError;
use crate::taxonomy::taxonomy;

const TEXT_REQUIRED: &str = "Text must be defined";

/// Rebuild a plan owned by an outcome under `owner_bloom`. A stored
/// `sourceBloom` takes precedence.
pub(crate) fn assessment_plan(
    map: Map<String, Value>,
    owner_bloom: &str,
) -> Result<AssessmentPlan, DomainError> {
    let mut bag = PropertyBag::new(&ASSESSMENT_PLAN, map);

    let source = bag.take_string("sourceBloom")?.present();
    let mut plan = AssessmentPlan::new(source.as_deref().unwrap_or(owner_bloom))?;

    let kind = bag
        .take_string("plan")?
        .reject_null(|| DomainError::field_type("AssessmentPlan", "plan", "a string"))?;
    if let Some(kind) = kind {
        plan.set_plan(kind)?;
    }
    if let Some(text) = bag
        .take_string("text")?
        .reject_null(|| DomainError::InvalidText(TEXT_REQUIRED))?
    {
        plan.set_text(text);
    }

    Ok(plan.with_extensions(bag.into_extensions()))
}

/// Rebuild a strategy owned by an outcome under `owner_bloom`. First-generation
/// documents stored the instruction class as `plan`.
pub(crate) fn instructional_strategy(
    map: Map<String, Value>,
    owner_bloom: &str,
) -> Result<InstructionalStrategy, DomainError> {
    let mut bag = PropertyBag::new(&INSTRUCTIONAL_STRATEGY, map);

    let source = bag.take_string("sourceBloom")?.present();
    let mut strategy = InstructionalStrategy::new(source.as_deref().unwrap_or(owner_bloom))?;

    let kind = bag.take_string("instruction")?.reject_null(|| {
        DomainError::field_type("InstructionalStrategy", "instruction", "a string")
    })?;
    if let Some(kind) = kind {
        strategy.set_instruction(kind)?;
    }
    if let Some(text) = bag
        .take_string("text")?
        .reject_null(|| DomainError::InvalidText(TEXT_REQUIRED))?
    {
        strategy.set_text(text);
    }

    Ok(strategy.with_extensions(bag.into_extensions()))
}

impl Instantiate for AssessmentPlan {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        assessment_plan(bag, taxonomy().default_bloom().name())
    }
}

impl Instantiate for InstructionalStrategy {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        instructional_strategy(bag, taxonomy().default_bloom().name())
    }
}
