use serde::{Serialize, Serializer};

use crate::reconstruction::schema::LEARNING_GOAL;
use crate::reconstruction::write::WriteBack;
use crate::reconstruction::Extensions;

/// Something a learning object sets out to achieve, in free text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearningGoal {
    text: String,
    extensions: Extensions,
}

impl LearningGoal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extensions: Extensions::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Persisted fields this crate does not model.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub(crate) fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }
}

#[derive(Serialize)]
struct LearningGoalWireFormat<'a> {
    text: &'a str,
    #[serde(flatten)]
    extensions: &'a Extensions,
}

impl Serialize for LearningGoal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let write_back = WriteBack::new(&LEARNING_GOAL, &self.extensions);
        let wire = LearningGoalWireFormat {
            text: &self.text,
            extensions: write_back.extensions(),
        };
        write_back.write(wire, serializer)
    }
}
