use serde_json::{Map, Value};

use super::bag::PropertyBag;
use super::plans::{assessment_plan, instructional_strategy};
use super::schema::LEARNING_OUTCOME;
use super::Instantiate;
use crate::entities::LearningOutcome;
use crate::error::DomainError;
use crate::taxonomy::taxonomy;
use crate::value_objects::OutcomeMapping;

/// A reconstructed outcome, and whether its document carried a tag.
pub(crate) struct RestoredOutcome {
    pub outcome: LearningOutcome,
    pub tagged: bool,
}

pub(crate) fn restore_outcome(map: Map<String, Value>) -> Result<RestoredOutcome, DomainError> {
    let mut bag = PropertyBag::new(&LEARNING_OUTCOME, map);
    let mut outcome = LearningOutcome::new();

    let tag = bag.take_u32("tag")?.present();
    if let Some(tag) = tag {
        outcome.set_tag(tag);
    }

    let bloom = bag
        .take_string("bloom")?
        .reject_null(|| DomainError::InvalidBloom("null".into()))?;
    let verb = bag
        .take_string("verb")?
        .reject_null(|| DomainError::invalid_verb(outcome.bloom(), "null"))?;
    match (bloom, verb) {
        (Some(bloom), Some(verb)) => outcome.set_bloom_with_verb(bloom, verb)?,
        (Some(bloom), None) => {
            let verb = taxonomy().require_bloom(&bloom)?.default_verb().to_string();
            outcome.set_bloom_with_verb(bloom, verb)?;
        }
        (None, Some(verb)) => outcome.set_verb(verb)?,
        (None, None) => {}
    }

    if let Some(text) = bag
        .take_string("text")?
        .reject_null(|| DomainError::InvalidText("Text must be defined"))?
    {
        outcome.set_text(text);
    }

    for value in bag.take_array("mappings")?.present().unwrap_or_default() {
        if !value.is_object() {
            return Err(DomainError::InvalidMapping("mapping must be an object".into()));
        }
        let mapping: OutcomeMapping = serde_json::from_value(value)
            .map_err(|e| DomainError::InvalidMapping(e.to_string()))?;
        outcome.map_to(mapping);
    }

    let owner_bloom = outcome.bloom().to_string();
    for value in bag.take_array("assessments")?.present().unwrap_or_default() {
        let Value::Object(map) = value else {
            return Err(DomainError::field_type("LearningOutcome", "assessments", "an array of objects"));
        };
        outcome.push_assessment(assessment_plan(map, &owner_bloom)?);
    }
    for value in bag.take_array("strategies")?.present().unwrap_or_default() {
        let Value::Object(map) = value else {
            return Err(DomainError::field_type("LearningOutcome", "strategies", "an array of objects"));
        };
        outcome.push_strategy(instructional_strategy(map, &owner_bloom)?);
    }

    // derived from verb and text
    bag.discard("outcome");

    Ok(RestoredOutcome {
        outcome: outcome.with_extensions(bag.into_extensions()),
        tagged: tag.is_some(),
    })
}

impl Instantiate for LearningOutcome {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        restore_outcome(bag).map(|restored| restored.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instantiate(value: Value) -> Result<LearningOutcome, DomainError> {
        LearningOutcome::instantiate_value(value)
    }

    #[test]
    fn rebuilds_nested_plans_under_outcome_bloom() {
        let outcome = instantiate(json!({
            "tag": 2,
            "bloom": "apply",
            "verb": "configure",
            "text": "a firewall",
            "outcome": "stale statement",
            "assessments": [{ "plan": "practical", "text": "Lab 3" }],
            "strategies": [{ "instruction": "lab" }]
        }))
        .unwrap();

        assert_eq!(outcome.tag(), 2);
        assert_eq!(outcome.outcome(), "configure a firewall");
        assert_eq!(outcome.assessments()[0].source_bloom(), "apply");
        assert_eq!(outcome.strategies()[0].instruction(), "lab");
        assert!(outcome.extensions().is_empty());
    }

    #[test]
    fn stored_statements_are_never_kept() {
        let outcome = instantiate(json!({
            "_outcome": "list ports",
            "outcome": "older statement",
            "_text": "ports",
            "text": "port numbers"
        }))
        .unwrap();
        assert_eq!(outcome.text(), "ports");
        assert!(outcome.extensions().get("outcome").is_none());
        assert_eq!(outcome.extensions().get("text"), Some(&json!("port numbers")));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["_text"], "ports");
        assert_eq!(json["text"], "port numbers");
        assert_eq!(json["outcome"], outcome.outcome());
        assert_eq!(instantiate(json).unwrap(), outcome);
    }

    #[test]
    fn bloom_without_verb_takes_first_verb() {
        let outcome = instantiate(json!({ "_bloom": "create" })).unwrap();
        assert_eq!(outcome.bloom(), "create");
        assert_eq!(outcome.verb(), taxonomy().bloom("create").unwrap().default_verb());
    }

    #[test]
    fn invalid_values_fail() {
        assert_eq!(
            instantiate(json!({ "bloom": "memorize" })).unwrap_err(),
            DomainError::InvalidBloom("memorize".into())
        );
        assert!(matches!(
            instantiate(json!({ "bloom": "apply", "verb": "define" })),
            Err(DomainError::InvalidVerb { .. })
        ));
        assert_eq!(
            instantiate(json!({ "text": null })).unwrap_err(),
            DomainError::InvalidText("Text must be defined")
        );
        assert!(matches!(
            instantiate(json!({ "assessments": ["quiz"] })),
            Err(DomainError::InvalidFieldType { field: "assessments", .. })
        ));
    }

    #[test]
    fn mappings_are_kept() {
        let outcome = instantiate(json!({
            "mappings": [{ "author": "NCWF", "name": "K0027", "date": "2017", "outcome": "Know OS" }]
        }))
        .unwrap();
        assert_eq!(outcome.mappings()[0].name, "K0027");
        assert!(matches!(
            instantiate(json!({ "mappings": ["K0027"] })),
            Err(DomainError::InvalidMapping(_))
        ));
    }

    #[test]
    fn untagged_outcome_is_reported() {
        let restored = restore_outcome(Map::new()).unwrap();
        assert!(!restored.tagged);
        assert_eq!(restored.outcome, LearningOutcome::new());
    }
}
