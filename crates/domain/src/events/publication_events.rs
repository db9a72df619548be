//! Publication workflow events

use crate::value_objects::Status;

/// Outcome of setting a learning object's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Object entered `released`; it is now published
    Released { from: Status },
    /// Status moved between two non-released states
    Changed { from: Status, to: Status },
    /// Status was already the requested value
    Unchanged { status: Status },
}

impl StatusChange {
    /// The status after the change.
    pub fn status(self) -> Status {
        match self {
            Self::Released { .. } => Status::Released,
            Self::Changed { to, .. } => to,
            Self::Unchanged { status } => status,
        }
    }
}
