//! Classification vocabularies for learning objects
//!
//! The string forms are the persisted wire vocabulary and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// ============================================================================
// Length
// ============================================================================

/// Granularity of a learning object, from a single nanomodule up to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    #[default]
    Nanomodule,
    Micromodule,
    Module,
    Unit,
    Course,
}

impl Length {
    pub const ALL: [Length; 5] = [
        Self::Nanomodule,
        Self::Micromodule,
        Self::Module,
        Self::Unit,
        Self::Course,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nanomodule => "nanomodule",
            Self::Micromodule => "micromodule",
            Self::Module => "module",
            Self::Unit => "unit",
            Self::Course => "course",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Length {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| DomainError::InvalidLength(s.to_string()))
    }
}

// ============================================================================
// AcademicLevel
// ============================================================================

/// Target audience of a learning object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcademicLevel {
    #[serde(rename = "elementary")]
    Elementary,
    #[serde(rename = "middle")]
    Middle,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "undergraduate")]
    Undergraduate,
    #[serde(rename = "graduate")]
    Graduate,
    #[serde(rename = "post graduate")]
    PostGraduate,
    #[serde(rename = "community college")]
    CommunityCollege,
    #[serde(rename = "training")]
    Training,
}

impl AcademicLevel {
    pub const ALL: [AcademicLevel; 8] = [
        Self::Elementary,
        Self::Middle,
        Self::High,
        Self::Undergraduate,
        Self::Graduate,
        Self::PostGraduate,
        Self::CommunityCollege,
        Self::Training,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::Middle => "middle",
            Self::High => "high",
            Self::Undergraduate => "undergraduate",
            Self::Graduate => "graduate",
            Self::PostGraduate => "post graduate",
            Self::CommunityCollege => "community college",
            Self::Training => "training",
        }
    }
}

impl fmt::Display for AcademicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcademicLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| DomainError::InvalidLevel(s.to_string()))
    }
}

// ============================================================================
// Status
// ============================================================================

/// Publication workflow state of a learning object
///
/// # State Transitions
///
/// ```text
/// Unreleased -> Waiting -> Reviewed -> Proofing -> Released
/// (any non-terminal) -> Rejected
/// ```
///
/// Entering `Released` also publishes the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Rejected,
    #[default]
    Unreleased,
    Waiting,
    Reviewed,
    Proofing,
    Released,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Self::Rejected,
        Self::Unreleased,
        Self::Waiting,
        Self::Reviewed,
        Self::Proofing,
        Self::Released,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Unreleased => "unreleased",
            Self::Waiting => "waiting",
            Self::Reviewed => "reviewed",
            Self::Proofing => "proofing",
            Self::Released => "released",
        }
    }

    /// Returns true for states that end the review workflow.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Released)
    }

    /// The next state along the review workflow, if any.
    pub fn successor(self) -> Option<Status> {
        match self {
            Self::Unreleased => Some(Self::Waiting),
            Self::Waiting => Some(Self::Reviewed),
            Self::Reviewed => Some(Self::Proofing),
            Self::Proofing => Some(Self::Released),
            Self::Rejected | Self::Released => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_vocabulary_is_exact() {
        let lengths: Vec<_> = Length::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(lengths, ["nanomodule", "micromodule", "module", "unit", "course"]);

        let statuses: Vec<_> = Status::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            statuses,
            ["rejected", "unreleased", "waiting", "reviewed", "proofing", "released"]
        );

        let levels: Vec<_> = AcademicLevel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(
            levels,
            [
                "elementary",
                "middle",
                "high",
                "undergraduate",
                "graduate",
                "post graduate",
                "community college",
                "training"
            ]
        );
    }

    #[test]
    fn serde_matches_as_str() {
        for level in AcademicLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
        for status in Status::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for length in Length::ALL {
            let json = serde_json::to_string(&length).unwrap();
            assert_eq!(json, format!("\"{}\"", length.as_str()));
        }
    }

    #[test]
    fn parse_errors_name_the_value() {
        assert_eq!(
            "some length".parse::<Length>().unwrap_err(),
            DomainError::InvalidLength("some length".into())
        );
        assert_eq!(
            "k-12".parse::<AcademicLevel>().unwrap_err(),
            DomainError::InvalidLevel("k-12".into())
        );
        assert_eq!(
            "some status".parse::<Status>().unwrap_err(),
            DomainError::InvalidStatus("some status".into())
        );
        assert_eq!(
            "post graduate".parse::<AcademicLevel>().unwrap(),
            AcademicLevel::PostGraduate
        );
    }

    #[test]
    fn status_workflow() {
        assert_eq!(Status::default(), Status::Unreleased);
        assert_eq!(Status::Proofing.successor(), Some(Status::Released));
        assert_eq!(Status::Released.successor(), None);
        assert!(Status::Rejected.is_terminal());
        assert!(!Status::Waiting.is_terminal());
    }
}
