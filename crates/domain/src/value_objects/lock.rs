//! Externally imposed access restrictions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;

/// What a lock restricts. Enforcement belongs to the surrounding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Restriction {
    Full,
    Publish,
    Download,
}

impl Restriction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Publish => "publish",
            Self::Download => "download",
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Restriction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "publish" => Ok(Self::Publish),
            "download" => Ok(Self::Download),
            _ => Err(DomainError::InvalidLock(format!(
                "{} is not a valid restriction",
                s
            ))),
        }
    }
}

/// A lock on a learning object. Keys it does not model stay in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningObjectLock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub restrictions: Vec<Restriction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LearningObjectLock {
    pub fn new(restrictions: Vec<Restriction>) -> Self {
        Self {
            date: None,
            restrictions,
            extra: Map::new(),
        }
    }

    /// Set the date the lock expires or was imposed, as stored by the caller.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn restricts(&self, restriction: Restriction) -> bool {
        self.restrictions.contains(&restriction) || self.restrictions.contains(&Restriction::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_lock_restricts_everything() {
        let lock = LearningObjectLock::new(vec![Restriction::Full]);
        assert!(lock.restricts(Restriction::Publish));
        assert!(lock.restricts(Restriction::Download));
    }

    #[test]
    fn partial_lock() {
        let lock = LearningObjectLock::new(vec![Restriction::Download]).with_date("1533081600000");
        assert!(lock.restricts(Restriction::Download));
        assert!(!lock.restricts(Restriction::Publish));
        assert_eq!(lock.date.as_deref(), Some("1533081600000"));
    }

    #[test]
    fn wire_form() {
        let lock: LearningObjectLock =
            serde_json::from_value(json!({ "restrictions": ["publish", "download"] })).unwrap();
        assert_eq!(lock.restrictions, vec![Restriction::Publish, Restriction::Download]);
        assert_eq!(
            serde_json::to_value(&lock).unwrap(),
            json!({ "restrictions": ["publish", "download"] })
        );
        assert!(serde_json::from_value::<LearningObjectLock>(json!({ "restrictions": ["edit"] })).is_err());
    }

    #[test]
    fn parse_restriction() {
        assert_eq!("full".parse::<Restriction>().unwrap(), Restriction::Full);
        assert!(matches!("edit".parse::<Restriction>(), Err(DomainError::InvalidLock(_))));
    }

    #[test]
    fn keeps_unmodelled_keys() {
        let doc = json!({ "restrictions": ["download"], "reason": "dmca" });
        let lock: LearningObjectLock = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(lock.extra.get("reason"), Some(&json!("dmca")));
        assert_eq!(serde_json::to_value(&lock).unwrap(), doc);
    }
}
