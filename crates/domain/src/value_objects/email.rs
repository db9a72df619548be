use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// local@domain.tld, no whitespace, one @
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
});

/// A structurally valid email address (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` unless the trimmed value looks like
    /// `local@domain.tld`.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into();
        let trimmed = email.trim();
        if EMAIL_RE.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::InvalidEmail(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_structural_addresses() {
        assert_eq!(Email::new(" me@dev.com ").unwrap().as_str(), "me@dev.com");
        assert!(Email::new("first.last+tag@sub.example.edu").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "two@@at.com", "no-tld@host", "spa ce@x.com", "@x.com"] {
            assert!(
                matches!(Email::new(bad), Err(DomainError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
    }
}
