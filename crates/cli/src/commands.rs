//! Subcommands operating on files of stored learning objects
//!
//! A file holds either one learning-object document or an array of them.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clark_domain::{Instantiate, LearningObject, Submit, SubmittableLearningObject};
use serde_json::Value;

/// Reconstructs every document, stopping at the first invalid one.
pub fn check(path: &Path) -> Result<Vec<LearningObject>> {
    let docs = match read_json(path)? {
        Value::Array(docs) => docs,
        doc @ Value::Object(_) => vec![doc],
        _ => anyhow::bail!(
            "{} must hold a learning object or an array of them",
            path.display()
        ),
    };
    reconstruct(path, docs)
}

/// Reconstructs every document, then checks that each is ready for review.
pub fn submit(path: &Path) -> Result<Vec<SubmittableLearningObject>> {
    let submitted = check(path)?
        .into_iter()
        .enumerate()
        .map(|(i, object)| {
            object
                .submit()
                .with_context(|| {
                    format!("learning object #{i} in {} is not submittable", path.display())
                })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("{} learning object(s) ready for submission", submitted.len());
    Ok(submitted)
}

/// Reconstructs every document and writes it back in its canonical form,
/// keeping the single-document or array shape of the input.
pub fn normalize(path: &Path, out: impl Write) -> Result<()> {
    let written = match read_json(path)? {
        Value::Array(docs) => serde_json::to_writer_pretty(out, &reconstruct(path, docs)?),
        doc => {
            let object = LearningObject::instantiate_value(doc)
                .with_context(|| format!("learning object in {}", path.display()))?;
            serde_json::to_writer_pretty(out, &object)
        }
    };
    written.context("writing normalized learning objects")
}

fn reconstruct(path: &Path, docs: Vec<Value>) -> Result<Vec<LearningObject>> {
    let objects = docs
        .into_iter()
        .enumerate()
        .map(|(i, doc)| {
            LearningObject::instantiate_value(doc)
                .with_context(|| format!("learning object #{i} in {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    for object in &objects {
        tracing::info!(
            name = object.name(),
            outcomes = object.outcomes().len(),
            children = object.children().len(),
            unresolved = object.child_refs().count(),
            status = %object.status(),
            "Learning object is valid"
        );
    }
    Ok(objects)
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
