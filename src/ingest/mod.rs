//! Event ingest from JSON
//!
//! Reads a JSON array of heartbeat records. Elements that are not objects, or
//! whose fields are not strings, become events with missing fields and are
//! dropped later by validation.

use std::path::Path;

use crate::event::Event;

/// Parse events from JSON text
pub fn parse_events(text: &str) -> Result<Vec<Event>, IngestError> {
    let json: serde_json::Value = serde_json::from_str(text)?;

    let items = json.as_array().ok_or(IngestError::NotAnArray)?;

    Ok(items.iter().map(Event::from_json).collect())
}

/// Load events from a JSON file
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>, IngestError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let events = parse_events(&text)?;

    tracing::debug!(
        path = %path.display(),
        events = events.len(),
        "Loaded heartbeat events"
    );

    Ok(events)
}

/// Ingest errors
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of events")]
    NotAnArray,
}
