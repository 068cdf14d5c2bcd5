use chrono::{DateTime, Utc};

/// A raw heartbeat as received at the input boundary
///
/// Either field may be absent. Non-string JSON values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub service: Option<String>,
    pub timestamp: Option<String>,
}

impl Event {
    /// Create an event with both fields present
    pub fn new(service: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            timestamp: Some(timestamp.into()),
        }
    }

    /// Build an event from an arbitrary JSON value
    ///
    /// Objects contribute their string-valued `service` and `timestamp`
    /// fields. Anything else yields an empty event.
    pub fn from_json(json: &serde_json::Value) -> Self {
        let field = |name: &str| {
            json.as_object()
                .and_then(|obj| obj.get(name))
                .and_then(|v| v.as_str())
                .map(String::from)
        };

        Self {
            service: field("service"),
            timestamp: field("timestamp"),
        }
    }
}

/// An event that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEvent {
    /// Non-empty service name
    pub service: String,
    /// Timestamp as it appeared in the input
    pub timestamp: String,
    /// Parsed absolute instant
    pub instant: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let event = Event::from_json(&json!({
            "service": "email",
            "timestamp": "2025-08-04T10:00:00Z",
            "extra": 1
        }));
        assert_eq!(event, Event::new("email", "2025-08-04T10:00:00Z"));
    }

    #[test]
    fn test_from_json_non_string_fields() {
        let event = Event::from_json(&json!({"service": 42, "timestamp": null}));
        assert_eq!(event.service, None);
        assert_eq!(event.timestamp, None);
    }

    #[test]
    fn test_from_json_non_object() {
        assert_eq!(Event::from_json(&json!("email")), Event::default());
        assert_eq!(Event::from_json(&json!([1, 2])), Event::default());
    }
}
