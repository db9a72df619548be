//! Common utility functions shared across the domain crate.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for datetime utilities

pub mod datetime;
pub mod string;

// Re-export commonly used functions for convenience
pub use datetime::{from_epoch_millis, now_millis, parse_timestamp, to_epoch_millis_string};
pub use string::{non_blank, trimmed};
