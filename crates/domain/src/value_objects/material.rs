//! Attachment metadata for learning objects
//!
//! Materials are opaque to the domain: the file service owns their meaning.
//! Every struct keeps keys it does not model in `extra` so a read-modify-write
//! cycle never loses attachment data written by newer services.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Files, links and notes attached to a learning object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub files: Vec<MaterialFile>,
    pub urls: Vec<Url>,
    pub notes: String,
    pub folder_descriptions: Vec<FolderDescription>,
    pub pdf: LearningObjectPdf,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialFile {
    pub id: String,
    pub name: String,
    pub file_type: String,
    pub extension: String,
    pub url: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Url {
    pub title: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderDescription {
    pub path: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The generated PDF rendition of a learning object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningObjectPdf {
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_blank() {
        let m = Material::default();
        assert!(m.files.is_empty());
        assert!(m.urls.is_empty());
        assert_eq!(m.notes, "");
        assert_eq!(m.pdf, LearningObjectPdf::default());
    }

    #[test]
    fn deserializes_partial_documents() {
        let m: Material = serde_json::from_value(json!({
            "urls": [{ "title": "NIST", "url": "https://nist.gov" }],
            "folderDescriptions": [{ "path": "slides", "description": "Lecture slides" }]
        }))
        .unwrap();
        assert_eq!(m.urls[0].title, "NIST");
        assert_eq!(m.folder_descriptions[0].path, "slides");
        assert_eq!(m.notes, "");
    }

    #[test]
    fn keeps_unmodelled_keys() {
        let doc = json!({
            "files": [{
                "id": "f1", "name": "lab.pdf", "fileType": "application/pdf",
                "extension": ".pdf", "url": "https://files/lab.pdf", "date": "1533081600000",
                "size": 2048, "packageable": true
            }],
            "urls": [], "notes": "", "folderDescriptions": [],
            "pdf": { "name": "", "url": "" },
            "uploadSession": "abc"
        });
        let m: Material = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(m.files[0].size, Some(2048));
        assert_eq!(m.files[0].extra.get("packageable"), Some(&json!(true)));
        assert_eq!(m.extra.get("uploadSession"), Some(&json!("abc")));
        assert_eq!(serde_json::to_value(&m).unwrap(), doc);
    }

    #[test]
    fn nested_values_keep_unmodelled_keys() {
        let doc = json!({
            "files": [],
            "urls": [{ "title": "RFC", "url": "u", "addedBy": "cfox" }],
            "notes": "",
            "folderDescriptions": [{ "path": "slides", "description": "", "order": 2 }],
            "pdf": { "name": "lo.pdf", "url": "p", "generatedAt": "1533081600000" }
        });
        let m: Material = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(m.urls[0].extra.get("addedBy"), Some(&json!("cfox")));
        assert_eq!(m.folder_descriptions[0].extra.get("order"), Some(&json!(2)));
        assert_eq!(m.pdf.extra.get("generatedAt"), Some(&json!("1533081600000")));
        assert_eq!(serde_json::to_value(&m).unwrap(), doc);
    }
}
