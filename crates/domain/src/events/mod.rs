//! Domain events
//!
//! Return types from aggregate mutations, communicating what happened when
//! state was modified so callers can react (e.g. notify reviewers on release).

mod publication_events;

pub use publication_events::StatusChange;
