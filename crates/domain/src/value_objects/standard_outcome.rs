//! Outcomes published by standards bodies

use serde::{Deserialize, Serialize};

use super::OutcomeMapping;

/// An outcome from a published standard, such as NCWF `K0027`.
///
/// Immutable; learning outcomes refer to one through an [`OutcomeMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardOutcome {
    /// Organization or document the outcome is drawn from (`NCWF`, `CAE`)
    author: String,
    /// Label or unit of the outcome (`K0027`, `Operating Systems Concepts`)
    name: String,
    /// Year the standard was established
    date: String,
    outcome: String,
}

impl StandardOutcome {
    pub fn new(
        author: impl Into<String>,
        name: impl Into<String>,
        date: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            date: date.into(),
            outcome: outcome.into(),
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn outcome(&self) -> &str {
        &self.outcome
    }

    /// A mapping to this outcome as suggested from storage entry `id`.
    pub fn suggested(self, id: impl Into<String>) -> OutcomeMapping {
        OutcomeMapping::from(self).with_id(id)
    }
}

impl From<StandardOutcome> for OutcomeMapping {
    fn from(standard: StandardOutcome) -> Self {
        OutcomeMapping::standard(standard.author, standard.name, standard.date, standard.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::LearningOutcome;
    use serde_json::json;

    fn k0027() -> StandardOutcome {
        StandardOutcome::new("NCWF", "K0027", "2017", "Knowledge of operating systems")
    }

    #[test]
    fn converts_to_mapping() {
        let mapping = OutcomeMapping::from(k0027());
        assert_eq!(mapping.author, "NCWF");
        assert_eq!(mapping.name, "K0027");
        assert_eq!(mapping.date, "2017");
        assert_eq!(mapping.outcome, "Knowledge of operating systems");
        assert_eq!(mapping.id, None);
        assert_eq!(mapping.tag, None);

        assert_eq!(k0027().suggested("sug-1").id.as_deref(), Some("sug-1"));
    }

    #[test]
    fn outcomes_map_to_standards() {
        let mut outcome = LearningOutcome::new();
        assert_eq!(outcome.map_to(k0027().into()), 0);
        assert_eq!(outcome.mappings()[0].name, "K0027");
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(k0027()).unwrap();
        assert_eq!(
            json,
            json!({
                "author": "NCWF",
                "name": "K0027",
                "date": "2017",
                "outcome": "Knowledge of operating systems"
            })
        );
        assert_eq!(serde_json::from_value::<StandardOutcome>(json).unwrap(), k0027());
        assert!(serde_json::from_value::<StandardOutcome>(json!({ "author": "CAE" })).is_err());
    }
}
