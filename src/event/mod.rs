//! Heartbeat events and validation
//!
//! Raw events arrive with optional fields; the validator turns the
//! well-formed ones into [`ValidatedEvent`]s carrying a parsed instant.

pub mod model;
pub mod validate;

pub use model::{Event, ValidatedEvent};
pub use validate::{filter_valid, is_valid, parse_timestamp, validate};
