//! Field-name tables for every persisted entity
//!
//! Each concept lists the names it has been stored under, highest priority
//! first. Revisions are tried in [`SchemaRevision`] order.

/// A generation of the persisted document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaRevision {
    /// Raw class fields were serialized: `_name`, `_levels`, ...
    ClassFields,
    /// Accessor names were serialized: `name`, `levels`, ...
    Accessors,
    /// First-generation documents: `level`, `repository`, ...
    Original,
}

/// One concept and the names it may appear under.
#[derive(Debug)]
pub struct FieldAliases {
    pub concept: &'static str,
    pub aliases: &'static [(SchemaRevision, &'static str)],
}

/// The concepts of one entity.
#[derive(Debug)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub fields: &'static [FieldAliases],
}

impl EntitySchema {
    pub fn field(&self, concept: &str) -> Option<&FieldAliases> {
        self.fields.iter().find(|f| f.concept == concept)
    }
}

/// `aliases!("name")` covers `_name` and `name`; extra first-generation
/// names follow the concept.
macro_rules! aliases {
    ($concept:literal $(, $original:literal)*) => {
        FieldAliases {
            concept: $concept,
            aliases: &[
                (SchemaRevision::ClassFields, concat!("_", $concept)),
                (SchemaRevision::Accessors, $concept),
                $((SchemaRevision::Original, $original),)*
            ],
        }
    };
}

pub static LEARNING_OBJECT: EntitySchema = EntitySchema {
    entity: "LearningObject",
    fields: &[
        aliases!("id"),
        aliases!("author"),
        aliases!("name"),
        aliases!("description"),
        aliases!("date"),
        aliases!("length"),
        aliases!("levels", "level"),
        aliases!("goals"),
        aliases!("outcomes"),
        aliases!("materials", "repository"),
        aliases!("metrics"),
        aliases!("published"),
        aliases!("status"),
        aliases!("children"),
        aliases!("contributors"),
        aliases!("lock"),
        aliases!("collection"),
    ],
};

pub static LEARNING_OUTCOME: EntitySchema = EntitySchema {
    entity: "LearningOutcome",
    fields: &[
        aliases!("tag"),
        aliases!("bloom"),
        aliases!("verb"),
        aliases!("text"),
        aliases!("mappings"),
        aliases!("assessments"),
        aliases!("strategies"),
        // derived, recomputed on write
        aliases!("outcome"),
    ],
};

pub static ASSESSMENT_PLAN: EntitySchema = EntitySchema {
    entity: "AssessmentPlan",
    fields: &[aliases!("sourceBloom"), aliases!("plan"), aliases!("text")],
};

pub static INSTRUCTIONAL_STRATEGY: EntitySchema = EntitySchema {
    entity: "InstructionalStrategy",
    fields: &[
        aliases!("sourceBloom"),
        aliases!("instruction", "plan"),
        aliases!("text"),
    ],
};

pub static LEARNING_GOAL: EntitySchema = EntitySchema {
    entity: "LearningGoal",
    fields: &[aliases!("text")],
};

pub static USER: EntitySchema = EntitySchema {
    entity: "User",
    fields: &[
        aliases!("id"),
        aliases!("username"),
        aliases!("name"),
        aliases!("email"),
        aliases!("emailVerified"),
        aliases!("organization"),
        aliases!("bio"),
        aliases!("createdAt"),
        aliases!("objects"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_fields_come_first() {
        let name = LEARNING_OBJECT.field("name").unwrap();
        assert_eq!(
            name.aliases,
            &[
                (SchemaRevision::ClassFields, "_name"),
                (SchemaRevision::Accessors, "name"),
            ]
        );
    }

    #[test]
    fn first_generation_names_come_last() {
        let levels = LEARNING_OBJECT.field("levels").unwrap();
        assert_eq!(levels.aliases.last(), Some(&(SchemaRevision::Original, "level")));
        let materials = LEARNING_OBJECT.field("materials").unwrap();
        assert_eq!(materials.aliases.last(), Some(&(SchemaRevision::Original, "repository")));
    }

    #[test]
    fn no_alias_is_claimed_twice() {
        for schema in [
            &LEARNING_OBJECT,
            &LEARNING_OUTCOME,
            &ASSESSMENT_PLAN,
            &INSTRUCTIONAL_STRATEGY,
            &LEARNING_GOAL,
            &USER,
        ] {
            let mut seen = Vec::new();
            for field in schema.fields {
                for (_, alias) in field.aliases {
                    assert!(!seen.contains(alias), "{}.{alias} claimed twice", schema.entity);
                    seen.push(*alias);
                }
            }
        }
    }
}
