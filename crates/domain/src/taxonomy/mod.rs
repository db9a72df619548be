//! Bloom taxonomy lookup tables
//!
//! A read-only, process-wide registry answering which verbs, assessment
//! classes and instructional-strategy classes are valid for a Bloom taxon,
//! and which length classes exist. The host installs its tables once with
//! [`install`] before constructing entities; otherwise the built-in tables are
//! used. Nothing in this crate mutates the registry after initialization, so
//! reads need no locking.

mod builtin;

use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::DomainError;
use crate::value_objects::Length;

static TAXONOMY: OnceLock<TaxonomyTables> = OnceLock::new();

/// Installs the process-wide taxonomy.
///
/// # Errors
///
/// Returns `DomainError::InvalidTaxonomy` if a taxonomy is already in use,
/// either installed earlier or initialized implicitly by a prior lookup.
pub fn install(tables: TaxonomyTables) -> Result<(), DomainError> {
    TAXONOMY.set(tables).map_err(|_| {
        DomainError::invalid_taxonomy("taxonomy already initialized for this process")
    })?;
    tracing::debug!("Installed taxonomy tables");
    Ok(())
}

/// Returns the process-wide taxonomy, falling back to the built-in tables.
pub fn taxonomy() -> &'static TaxonomyTables {
    TAXONOMY.get_or_init(TaxonomyTables::builtin)
}

/// The classes registered for one Bloom taxon.
///
/// Lists are kept in registration order and are never empty (checked by
/// [`TaxonomyTables::new`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BloomTaxon {
    name: String,
    verbs: Vec<String>,
    assessments: Vec<String>,
    instructions: Vec<String>,
}

impl BloomTaxon {
    pub fn new(
        name: impl Into<String>,
        verbs: Vec<String>,
        assessments: Vec<String>,
        instructions: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            verbs,
            assessments,
            instructions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    pub fn assessments(&self) -> &[String] {
        &self.assessments
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn has_verb(&self, verb: &str) -> bool {
        self.verbs.iter().any(|v| v == verb)
    }

    pub fn has_assessment(&self, plan: &str) -> bool {
        self.assessments.iter().any(|a| a == plan)
    }

    pub fn has_instruction(&self, instruction: &str) -> bool {
        self.instructions.iter().any(|i| i == instruction)
    }

    /// Verb given to outcomes that switch to this taxon without one.
    pub fn default_verb(&self) -> &str {
        first(&self.verbs)
    }

    /// Class given to newly added assessment plans.
    pub fn default_assessment(&self) -> &str {
        first(&self.assessments)
    }

    /// Class given to newly added instructional strategies.
    pub fn default_instruction(&self) -> &str {
        first(&self.instructions)
    }
}

fn first(items: &[String]) -> &str {
    items.first().map(String::as_str).unwrap_or_default()
}

/// Complete taxonomy: Bloom taxa in registration order plus length classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyTables {
    blooms: Vec<BloomTaxon>,
    lengths: Vec<String>,
}

#[derive(Deserialize)]
struct TaxonomyFile {
    blooms: Vec<BloomTaxon>,
    lengths: Vec<String>,
}

impl TaxonomyTables {
    /// Builds validated tables.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTaxonomy` if there are no taxa or lengths,
    /// a taxon name repeats, a taxon has an empty verb, assessment or
    /// instruction list, or a length is not a [`Length`] class.
    pub fn new(blooms: Vec<BloomTaxon>, lengths: Vec<String>) -> Result<Self, DomainError> {
        if blooms.is_empty() {
            return Err(DomainError::invalid_taxonomy("at least one Bloom taxon is required"));
        }
        if lengths.is_empty() {
            return Err(DomainError::invalid_taxonomy("at least one length is required"));
        }
        if let Some(unknown) = lengths.iter().find(|l| l.parse::<Length>().is_err()) {
            return Err(DomainError::invalid_taxonomy(format!(
                "{unknown} is not a learning object length"
            )));
        }
        for (i, taxon) in blooms.iter().enumerate() {
            if blooms[..i].iter().any(|t| t.name == taxon.name) {
                return Err(DomainError::invalid_taxonomy(format!(
                    "duplicate Bloom taxon {}",
                    taxon.name
                )));
            }
            for (kind, list) in [
                ("verbs", &taxon.verbs),
                ("assessments", &taxon.assessments),
                ("instructions", &taxon.instructions),
            ] {
                if list.is_empty() {
                    return Err(DomainError::invalid_taxonomy(format!(
                        "{} has no {}",
                        taxon.name, kind
                    )));
                }
            }
        }
        Ok(Self { blooms, lengths })
    }

    /// Parses tables from their JSON configuration form:
    /// `{ "blooms": [{ "name", "verbs", "assessments", "instructions" }], "lengths": [..] }`.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let file: TaxonomyFile = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_taxonomy(e.to_string()))?;
        Self::new(file.blooms, file.lengths)
    }

    /// The tables shipped with the crate.
    pub fn builtin() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            blooms: builtin::TAXA
                .iter()
                .map(|t| {
                    BloomTaxon::new(
                        t.name,
                        owned(t.verbs),
                        owned(t.assessments),
                        owned(t.instructions),
                    )
                })
                .collect(),
            lengths: owned(builtin::LENGTHS),
        }
    }

    /// Registered Bloom taxa names, in order.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.blooms.iter().map(|t| t.name.as_str())
    }

    pub fn is_level(&self, bloom: &str) -> bool {
        self.bloom(bloom).is_some()
    }

    pub fn bloom(&self, name: &str) -> Option<&BloomTaxon> {
        self.blooms.iter().find(|t| t.name == name)
    }

    /// Resolves a taxon or reports it as an invalid Bloom taxon.
    pub fn require_bloom(&self, name: &str) -> Result<&BloomTaxon, DomainError> {
        self.bloom(name)
            .ok_or_else(|| DomainError::InvalidBloom(name.to_string()))
    }

    /// Taxon seeding blank outcomes.
    pub fn default_bloom(&self) -> &BloomTaxon {
        // non-empty by construction
        &self.blooms[0]
    }

    pub fn verbs_for(&self, bloom: &str) -> Option<&[String]> {
        self.bloom(bloom).map(BloomTaxon::verbs)
    }

    pub fn assessment_classes_for(&self, bloom: &str) -> Option<&[String]> {
        self.bloom(bloom).map(BloomTaxon::assessments)
    }

    pub fn instruction_classes_for(&self, bloom: &str) -> Option<&[String]> {
        self.bloom(bloom).map(BloomTaxon::instructions)
    }

    pub fn lengths(&self) -> &[String] {
        &self.lengths
    }

    pub fn has_length(&self, length: &str) -> bool {
        self.lengths.iter().any(|l| l == length)
    }

    /// Length seeding blank learning objects: the first registered one.
    pub fn default_length(&self) -> Length {
        // every entry parses, checked by `new`
        self.lengths
            .iter()
            .find_map(|l| l.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_valid() {
        let builtin = TaxonomyTables::builtin();
        let rebuilt = TaxonomyTables::new(builtin.blooms.clone(), builtin.lengths.clone());
        assert_eq!(rebuilt.unwrap(), builtin);
    }

    #[test]
    fn builtin_lookups() {
        let t = TaxonomyTables::builtin();
        assert_eq!(t.default_bloom().name(), "remember");
        assert!(t.is_level("apply"));
        assert!(!t.is_level("memorize"));
        assert!(t.verbs_for("apply").unwrap().iter().any(|v| v == "implement"));
        assert!(t.assessment_classes_for("apply").unwrap().iter().any(|a| a == "lab exercise"));
        assert!(t.instruction_classes_for("create").is_some());
        assert!(t.has_length("course"));
        assert_eq!(t.default_length(), Length::Nanomodule);
        assert_eq!(t.levels().count(), 6);
    }

    #[test]
    fn require_bloom_reports_invalid_taxon() {
        let t = TaxonomyTables::builtin();
        assert_eq!(
            t.require_bloom("memorize").unwrap_err(),
            DomainError::InvalidBloom("memorize".into())
        );
    }

    #[test]
    fn from_json_str_loads_custom_tables() {
        let json = r#"{
            "blooms": [
                { "name": "know", "verbs": ["list"], "assessments": ["quiz"], "instructions": ["lecture"] }
            ],
            "lengths": ["module"]
        }"#;
        let t = TaxonomyTables::from_json_str(json).unwrap();
        assert_eq!(t.default_bloom().default_verb(), "list");
        assert_eq!(t.default_bloom().default_assessment(), "quiz");
        assert!(!t.has_length("course"));
        assert_eq!(t.default_length(), Length::Module);
    }

    #[test]
    fn rejects_lengths_outside_vocabulary() {
        let taxon = BloomTaxon::new("know", vec!["list".into()], vec!["quiz".into()], vec!["lecture".into()]);
        let err = TaxonomyTables::new(vec![taxon.clone()], vec!["module".into(), "semester".into()])
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_taxonomy("semester is not a learning object length")
        );

        let tables = TaxonomyTables::new(vec![taxon], vec!["unit".into(), "course".into()]).unwrap();
        assert_eq!(tables.default_length(), Length::Unit);
    }

    #[test]
    fn rejects_taxon_without_verbs() {
        let json = r#"{
            "blooms": [{ "name": "know", "verbs": [], "assessments": ["quiz"], "instructions": ["lecture"] }],
            "lengths": ["module"]
        }"#;
        let err = TaxonomyTables::from_json_str(json).unwrap_err();
        assert_eq!(err, DomainError::invalid_taxonomy("know has no verbs"));
    }

    #[test]
    fn rejects_duplicate_taxa_and_empty_tables() {
        let taxon = BloomTaxon::new("know", vec!["list".into()], vec!["quiz".into()], vec!["lecture".into()]);
        assert!(TaxonomyTables::new(vec![taxon.clone(), taxon], vec!["unit".into()]).is_err());
        assert!(TaxonomyTables::new(Vec::new(), vec!["unit".into()]).is_err());
        assert!(TaxonomyTables::from_json_str("not json").is_err());
    }
}
