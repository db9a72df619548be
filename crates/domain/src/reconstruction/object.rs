use serde_json::{Map, Value};

use super::bag::{entity_from, Field, PropertyBag};
use super::goal::goal_from;
use super::outcome::restore_outcome;
use super::schema::LEARNING_OBJECT;
use super::Instantiate;
use crate::aggregates::{LearningObject, LinkedObject};
use crate::entities::User;
use crate::error::DomainError;
use crate::ids::LearningObjectId;
use crate::value_objects::{AcademicLevel, LearningObjectLock, Length, Material, Metrics, Status};

impl Instantiate for LearningObject {
    fn instantiate(bag: Map<String, Value>) -> Result<Self, DomainError> {
        let mut bag = PropertyBag::new(&LEARNING_OBJECT, bag);
        let mut object = LearningObject::new();

        // Unsaved drafts were sometimes stored with an empty id
        if let Some(id) = bag.take_string("id")?.present().filter(|id| !id.trim().is_empty()) {
            object = object.with_id(LearningObjectId::new(id)?);
        }
        if let Some(author) = bag
            .take_entity::<User>("author", || DomainError::InvalidAuthor)?
            .present()
        {
            object.set_author(author);
        }

        // Descriptive fields
        let name = bag.take_string("name")?.reject_null(|| DomainError::InvalidName)?;
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            object.set_name(name)?;
        }
        if let Some(description) = bag
            .take_string("description")?
            .reject_null(|| DomainError::InvalidDescription("Description must be defined"))?
        {
            object.set_description(description);
        }
        if let Some(length) = bag
            .take_string("length")?
            .reject_null(|| DomainError::InvalidLength("null".into()))?
        {
            object.set_length(length.parse::<Length>()?)?;
        }
        if let Some(levels) = bag.take_array("levels")?.present() {
            let levels = parse_levels(levels)?;
            if !levels.is_empty() {
                object.set_levels(levels)?;
            }
        }

        // Instructional content
        for goal in bag.take_array("goals")?.present().unwrap_or_default() {
            object.push_goal(goal_from(goal)?);
        }
        for outcome in bag.take_array("outcomes")?.present().unwrap_or_default() {
            let Value::Object(map) = outcome else {
                return Err(DomainError::InvalidOutcome);
            };
            let restored = restore_outcome(map)?;
            object.restore_outcome(restored.outcome, restored.tagged);
        }
        if let Some(materials) = bag
            .take("materials")
            .reject_null(|| DomainError::InvalidMaterial("null".into()))?
        {
            let materials: Material = serde_json::from_value(materials)
                .map_err(|e| DomainError::InvalidMaterial(e.to_string()))?;
            object.set_materials(materials);
        }
        if let Some(metrics) = bag
            .take("metrics")
            .reject_null(|| DomainError::InvalidMetrics("null".into()))?
        {
            let metrics: Metrics = serde_json::from_value(metrics)
                .map_err(|e| DomainError::InvalidMetrics(e.to_string()))?;
            object.set_metrics(metrics);
        }

        // Publication: the flag first, so a released status can only raise it
        if bag.take_bool("published")?.present() == Some(true) {
            object.publish();
        }
        if let Some(status) = bag
            .take_string("status")?
            .reject_null(|| DomainError::InvalidStatus("null".into()))?
        {
            object.set_status(status.parse::<Status>()?);
        }

        // Relationships
        let children = bag.take_array("children")?.present().unwrap_or_default();
        for child in linked_objects(children, || DomainError::InvalidChild)? {
            match child {
                LinkedObject::Embedded(child) => object.add_child(child),
                LinkedObject::Reference(id) => object.add_child_ref(id),
            };
        }
        for contributor in bag.take_array("contributors")?.present().unwrap_or_default() {
            object.add_contributor(entity_from(contributor, || DomainError::InvalidContributor)?);
        }
        match bag.take("lock") {
            Field::Present(lock) => {
                let lock: LearningObjectLock = serde_json::from_value(lock)
                    .map_err(|e| DomainError::InvalidLock(e.to_string()))?;
                object.set_lock(Some(lock));
            }
            Field::Null => object.set_lock(None),
            Field::Missing => {}
        }
        if let Some(collection) = bag
            .take_string("collection")?
            .reject_null(|| DomainError::InvalidCollection)?
        {
            object.set_collection(collection);
        }

        // Last, so the setters above do not overwrite the stored timestamp
        if let Some(date) = bag.take_timestamp("date")?.present() {
            object.set_date(date);
        }

        Ok(object.with_extensions(bag.into_extensions()))
    }
}

/// Rebuild a stored list of learning objects in order, keeping bare ids as
/// references. `invalid` reports an entry that is neither.
pub(super) fn linked_objects(
    values: Vec<Value>,
    invalid: impl Fn() -> DomainError,
) -> Result<Vec<LinkedObject>, DomainError> {
    values
        .into_iter()
        .map(|value| match value {
            Value::Object(map) => LearningObject::instantiate(map).map(LinkedObject::Embedded),
            Value::String(id) => {
                tracing::debug!(id = %id, "Keeping unresolved learning object reference");
                LearningObjectId::new(id)
                    .map(LinkedObject::Reference)
                    .map_err(|_| invalid())
            }
            _ => Err(invalid()),
        })
        .collect()
}

/// Parse stored levels, dropping repeats the way early documents allowed them.
fn parse_levels(values: Vec<Value>) -> Result<Vec<AcademicLevel>, DomainError> {
    let mut levels = Vec::with_capacity(values.len());
    for value in values {
        let level = match value {
            Value::String(s) => s.parse::<AcademicLevel>()?,
            other => return Err(DomainError::InvalidLevel(other.to_string())),
        };
        if levels.contains(&level) {
            tracing::debug!(%level, "Dropping repeated academic level");
            continue;
        }
        levels.push(level);
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Restriction;
    use serde_json::json;

    fn instantiate(value: Value) -> Result<LearningObject, DomainError> {
        LearningObject::instantiate_value(value)
    }

    fn sample_document() -> Value {
        json!({
            "id": "lo-1",
            "author": { "username": "cfox", "name": "Cara Fox", "email": "cfox@towson.edu" },
            "name": "Firewalls",
            "description": "Stateful and stateless filtering",
            "date": "1533081600000",
            "length": "module",
            "levels": ["graduate", "training"],
            "goals": [{ "text": "Understand filtering" }],
            "outcomes": [{
                "tag": 4,
                "bloom": "apply",
                "verb": "configure",
                "text": "an iptables ruleset",
                "assessments": [{ "plan": "lab exercise", "text": "Lab 2" }]
            }],
            "materials": { "files": [], "urls": [{ "title": "RFC", "url": "https://x.org" }],
                           "notes": "", "folderDescriptions": [], "pdf": { "name": "", "url": "" } },
            "metrics": { "saves": 3, "downloads": 10 },
            "published": false,
            "status": "waiting",
            "children": [],
            "contributors": [{ "username": "skaza", "name": "Sean Kaza" }],
            "collection": "nccp"
        })
    }

    mod fields {
        use super::*;

        #[test]
        fn rebuilds_every_concept() {
            let object = instantiate(sample_document()).unwrap();

            assert_eq!(object.id().map(LearningObjectId::as_str), Some("lo-1"));
            assert_eq!(object.author().username(), "cfox");
            assert_eq!(object.name(), "Firewalls");
            assert_eq!(object.length(), Length::Module);
            assert_eq!(object.levels(), &[AcademicLevel::Graduate, AcademicLevel::Training]);
            assert_eq!(object.goals()[0].text(), "Understand filtering");
            assert_eq!(object.outcomes()[0].tag(), 4);
            assert_eq!(object.outcomes()[0].assessments()[0].source_bloom(), "apply");
            assert_eq!(object.materials().urls[0].title, "RFC");
            assert_eq!(object.metrics(), &Metrics::new(3, 10));
            assert_eq!(object.status(), Status::Waiting);
            assert_eq!(object.contributors()[0].username(), "skaza");
            assert_eq!(object.collection(), "nccp");
            assert_eq!(object.date().timestamp_millis(), 1_533_081_600_000);
        }

        #[test]
        fn missing_fields_keep_defaults() {
            let object = instantiate(json!({})).unwrap();
            let blank = LearningObject::new();
            assert_eq!(object.name(), blank.name());
            assert_eq!(object.description(), blank.description());
            assert_eq!(object.length(), blank.length());
            assert_eq!(object.levels(), blank.levels());
            assert_eq!(object.status(), blank.status());
            assert_eq!(object.published(), blank.published());
            assert_eq!(object.materials(), blank.materials());
            assert!(object.outcomes().is_empty());
            assert!(object.extensions().is_empty());
        }

        #[test]
        fn empty_id_means_unsaved() {
            let object = instantiate(json!({ "id": "", "name": "Draft" })).unwrap();
            assert_eq!(object.id(), None);
            assert_eq!(object.name(), "Draft");

            let json = serde_json::to_value(&object).unwrap();
            assert!(json.get("id").is_none());
            assert!(instantiate(json!({ "_id": "  " })).unwrap().id().is_none());
        }

        #[test]
        fn class_field_names_resolve() {
            let object = instantiate(json!({
                "_name": "Ports",
                "_levels": ["high"],
                "_status": "released",
                "_published": false
            }))
            .unwrap();
            assert_eq!(object.name(), "Ports");
            assert_eq!(object.levels(), &[AcademicLevel::High]);
            assert!(object.published());
        }

        #[test]
        fn first_generation_names_resolve() {
            let object = instantiate(json!({
                "level": ["elementary", "elementary", "middle"],
                "repository": { "notes": "see folder" }
            }))
            .unwrap();
            assert_eq!(object.levels(), &[AcademicLevel::Elementary, AcademicLevel::Middle]);
            assert_eq!(object.materials().notes, "see folder");
        }

        #[test]
        fn untagged_outcomes_get_fresh_tags() {
            let object = instantiate(json!({
                "outcomes": [{ "text": "a" }, { "tag": 0, "text": "b" }, { "text": "c" }]
            }))
            .unwrap();
            let tags: Vec<_> = object.outcomes().iter().map(|o| o.tag()).collect();
            assert_eq!(tags.len(), 3);
            assert!(tags.iter().all(|t| tags.iter().filter(|u| *u == t).count() == 1));
        }

        #[test]
        fn lock_null_clears() {
            let object = instantiate(json!({ "lock": { "restrictions": ["download"] } })).unwrap();
            assert!(object.lock().unwrap().restricts(Restriction::Download));
            let object = instantiate(json!({ "lock": null })).unwrap();
            assert!(object.lock().is_none());
        }
    }

    mod invalid {
        use super::*;

        #[test]
        fn present_invalid_values_fail() {
            let cases = [
                (json!({ "name": "   " }), DomainError::InvalidName),
                (json!({ "name": null }), DomainError::InvalidName),
                (json!({ "length": "semester" }), DomainError::InvalidLength("semester".into())),
                (json!({ "levels": ["phd"] }), DomainError::InvalidLevel("phd".into())),
                (json!({ "status": "archived" }), DomainError::InvalidStatus("archived".into())),
                (json!({ "collection": null }), DomainError::InvalidCollection),
                (json!({ "outcomes": ["x"] }), DomainError::InvalidOutcome),
                (json!({ "children": [3] }), DomainError::InvalidChild),
                (json!({ "children": [""] }), DomainError::InvalidChild),
                (json!({ "contributors": ["skaza"] }), DomainError::InvalidContributor),
                (json!({ "author": "cfox" }), DomainError::InvalidAuthor),
                (json!({ "goals": [false] }), DomainError::InvalidGoal),
            ];
            for (doc, expected) in cases {
                assert_eq!(instantiate(doc.clone()).unwrap_err(), expected, "{doc}");
            }
        }

        #[test]
        fn null_description_materials_and_metrics_fail() {
            assert!(matches!(
                instantiate(json!({ "description": null })),
                Err(DomainError::InvalidDescription(_))
            ));
            assert!(matches!(
                instantiate(json!({ "materials": null })),
                Err(DomainError::InvalidMaterial(_))
            ));
            assert!(matches!(
                instantiate(json!({ "metrics": { "saves": -1 } })),
                Err(DomainError::InvalidMetrics(_))
            ));
        }

        #[test]
        fn nested_failures_propagate() {
            let err = instantiate(json!({
                "outcomes": [{ "bloom": "apply", "assessments": [{ "plan": "essay" }] }]
            }))
            .unwrap_err();
            assert!(matches!(err, DomainError::InvalidPlan { .. }));
        }
    }

    mod round_trip {
        use super::*;

        #[test]
        fn serialized_object_reconstructs() {
            let original = instantiate(sample_document()).unwrap();
            let json = serde_json::to_value(&original).unwrap();
            let back: LearningObject = serde_json::from_value(json).unwrap();

            assert_eq!(back.name(), original.name());
            assert_eq!(back.length(), original.length());
            assert_eq!(back.levels(), original.levels());
            assert_eq!(back.status(), original.status());
            assert_eq!(back.goals().len(), original.goals().len());
            assert_eq!(back.outcomes().len(), original.outcomes().len());
            assert_eq!(back.children().len(), original.children().len());
            assert_eq!(back.contributors().len(), original.contributors().len());
            assert_eq!(back, original);
        }

        #[test]
        fn unknown_fields_survive() {
            let mut doc = sample_document();
            doc["ratings"] = json!([{ "value": 5 }]);
            doc["outcomes"][0]["legacyCode"] = json!("LO-7");

            let object = instantiate(doc).unwrap();
            assert_eq!(object.extensions().get("ratings"), Some(&json!([{ "value": 5 }])));

            let json = serde_json::to_value(&object).unwrap();
            assert_eq!(json["ratings"], json!([{ "value": 5 }]));
            assert_eq!(json["outcomes"][0]["legacyCode"], "LO-7");
        }

        #[test]
        fn shadowed_legacy_values_survive() {
            let object = instantiate(json!({ "_name": "New", "name": "Old title" })).unwrap();
            assert_eq!(object.name(), "New");
            assert_eq!(object.extensions().get("name"), Some(&json!("Old title")));

            let json = serde_json::to_value(&object).unwrap();
            assert_eq!(json["_name"], "New");
            assert_eq!(json["name"], "Old title");

            let back = instantiate(json).unwrap();
            assert_eq!(back.name(), "New");
            assert_eq!(back, object);
        }

        #[test]
        fn shadowed_value_behind_unset_name_stays_shadowed() {
            let object = instantiate(json!({ "_name": "", "name": "Old title" })).unwrap();
            assert_eq!(object.name(), "");

            let json = serde_json::to_value(&object).unwrap();
            assert_eq!(json["_name"], "");
            let back = instantiate(json).unwrap();
            assert_eq!(back.name(), "");
            assert_eq!(back.extensions().get("name"), Some(&json!("Old title")));
        }

        #[test]
        fn shadowed_first_generation_values_survive() {
            let object = instantiate(json!({ "levels": ["graduate"], "level": ["high"] })).unwrap();
            assert_eq!(object.levels(), &[AcademicLevel::Graduate]);

            let json = serde_json::to_value(&object).unwrap();
            assert_eq!(json["levels"], json!(["graduate"]));
            assert_eq!(json["level"], json!(["high"]));
            assert_eq!(instantiate(json).unwrap(), object);
        }

        #[test]
        fn children_and_references_survive() {
            let doc = json!({
                "name": "Course",
                "children": [{ "name": "Week 1", "status": "released" }, "lo-9"]
            });
            let object = instantiate(doc).unwrap();
            let week = object.child(0).unwrap();
            assert_eq!(week.name(), "Week 1");
            assert!(week.published());
            assert_eq!(object.child_refs().map(LearningObjectId::as_str).collect::<Vec<_>>(), ["lo-9"]);

            let json = serde_json::to_value(&object).unwrap();
            assert_eq!(json["children"][1], "lo-9");
            let back = LearningObject::instantiate_value(json).unwrap();
            assert_eq!(back, object);
        }

        #[test]
        fn reference_ahead_of_embedded_child_keeps_its_place() {
            let doc = json!({
                "name": "Course",
                "children": ["lo-9", { "id": "lo-10", "name": "Week 2" }, "lo-11"]
            });
            let mut object = instantiate(doc).unwrap();
            assert!(object.children()[0].is_reference());
            assert_eq!(object.child(1).map(LearningObject::name), Some("Week 2"));

            let json = serde_json::to_value(&object).unwrap();
            assert_eq!(json["children"][0], "lo-9");
            assert_eq!(json["children"][1]["name"], "Week 2");
            assert_eq!(json["children"][2], "lo-11");

            let mut loaded = LearningObject::new().with_id(LearningObjectId::new("lo-9").unwrap());
            loaded.set_name("Week 1").unwrap();
            assert_eq!(object.resolve_child(loaded), Ok(0));
            let names: Vec<_> = object
                .children()
                .iter()
                .map(|c| c.object().map(LearningObject::name))
                .collect();
            assert_eq!(names, [Some("Week 1"), Some("Week 2"), None]);
        }
    }
}
