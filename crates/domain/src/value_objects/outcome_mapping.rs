//! Non-owning references between outcomes
//!
//! A mapping records that an outcome achieves something similar to another
//! outcome: a learning outcome of this or another learning object, or a
//! standard outcome published by an external body (e.g. NCWF `K0027`). The
//! mapping holds only the identifying summary, never the referenced outcome.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary of a mapped outcome, shaped like every outcome's public face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeMapping {
    /// Storage id of a standard outcome, when the mapping came from a suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Author of the source (a user's name, or a standards body like `NCWF`).
    #[serde(default)]
    pub author: String,
    /// Source name (learning object name, or a label like `K0027`).
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    /// Outcome text, verb included.
    #[serde(default)]
    pub outcome: String,
    /// Tag of the mapped learning outcome within its object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutcomeMapping {
    /// A reference to a published standard outcome.
    pub fn standard(
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
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = Some(tag);
        self
    }
}
