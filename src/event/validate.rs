//! Event validation
//!
//! Malformed events are dropped without error: ingestion is best-effort and
//! a bad record never aborts a run.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use super::model::{Event, ValidatedEvent};

/// Length of the `YYYY-MM-DD` prefix
const DATE_LEN: usize = 10;

/// Date-time layouts, tried in order. Used bare (UTC) or with an offset.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// `+HH:MM` and `+HHMM`
const OFFSET_FORMATS: &[&str] = &["%:z", "%z"];

/// Parse a relaxed ISO-8601 timestamp into a UTC instant
///
/// Accepts a trailing `Z` or numeric offset, seconds/minutes precision down
/// to hour-only (`2025-08-04T10`), offset-less date-times taken as UTC, and
/// bare dates (midnight). Surrounding whitespace and leap seconds are
/// rejected. Returns `None` instead of failing.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() || text.trim() != text {
        return None;
    }

    let text = match text.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => text.to_string(),
    };
    let (body, offset) = split_offset(&text);
    let body = widen_hour_only(body);

    let parsed = match offset {
        Some(offset) => parse_with_offset(&body, offset),
        None => parse_naive(&body),
    }?;

    // chrono keeps a leap second as nanoseconds past one second
    (parsed.nanosecond() < 1_000_000_000).then_some(parsed)
}

/// Split `body+HH:MM` into body and offset; the date part never holds one
fn split_offset(text: &str) -> (&str, Option<&str>) {
    match text
        .get(DATE_LEN..)
        .and_then(|time| time.find(|c: char| c == '+' || c == '-'))
    {
        Some(pos) => {
            let (body, offset) = text.split_at(DATE_LEN + pos);
            (body, Some(offset))
        }
        None => (text, None),
    }
}

/// `YYYY-MM-DDTHH` -> `YYYY-MM-DDTHH:00`
fn widen_hour_only(body: &str) -> String {
    let hour_only = body.len() == DATE_LEN + 3
        && matches!(body.as_bytes()[DATE_LEN], b'T' | b' ')
        && body.as_bytes()[DATE_LEN + 1..].iter().all(u8::is_ascii_digit);

    if hour_only {
        format!("{}:00", body)
    } else {
        body.to_string()
    }
}

fn parse_with_offset(body: &str, offset: &str) -> Option<DateTime<Utc>> {
    let text = format!("{}{}", body, offset);

    DATETIME_FORMATS.iter().find_map(|format| {
        OFFSET_FORMATS.iter().find_map(|zone| {
            DateTime::parse_from_str(&text, &format!("{}{}", format, zone))
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
    })
}

fn parse_naive(body: &str) -> Option<DateTime<Utc>> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(body, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(body, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Validate a single event, producing its parsed form
pub fn validate(event: &Event) -> Option<ValidatedEvent> {
    let service = event.service.as_deref().filter(|s| !s.is_empty())?;
    let timestamp = event.timestamp.as_deref()?;
    let instant = parse_timestamp(timestamp)?;

    Some(ValidatedEvent {
        service: service.to_string(),
        timestamp: timestamp.to_string(),
        instant,
    })
}

/// Check whether an event has a non-empty service and a parseable timestamp
pub fn is_valid(event: &Event) -> bool {
    validate(event).is_some()
}

/// Keep the valid events, preserving input order
pub fn filter_valid(events: &[Event]) -> Vec<ValidatedEvent> {
    events.iter().filter_map(validate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_zulu_and_offset() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 4, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2025-08-04T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T10:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T12:00:00+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_relaxed_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 4, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2025-08-04T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T10:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T10"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-08-04"),
            Some(Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_reduced_precision_with_offset() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 4, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2025-08-04T10:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T10:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T12:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T10Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T05-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04T10:00:00+0000"), Some(expected));
        assert_eq!(parse_timestamp("2025-08-04 10:00:00Z"), Some(expected));
    }

    #[test]
    fn test_parse_rejects_padding_and_leap_second() {
        assert_eq!(parse_timestamp(" 2025-08-04T10:00:00Z"), None);
        assert_eq!(parse_timestamp("2025-08-04T10:00:00Z "), None);
        assert_eq!(parse_timestamp("2025-08-04T23:59:60Z"), None);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse_timestamp("2025-08-04T10:00:00.250Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("not-a-real-timestamp"), None);
        assert_eq!(parse_timestamp("invalid-time"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2025-13-45T10:00:00Z"), None);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(&Event::new("email", "2025-08-04T10:00:00Z")));

        // Missing service
        assert!(!is_valid(&Event {
            service: None,
            timestamp: Some("2025-08-04T10:01:00Z".to_string()),
        }));
        // Missing timestamp
        assert!(!is_valid(&Event {
            service: Some("email".to_string()),
            timestamp: None,
        }));
        // Empty service
        assert!(!is_valid(&Event::new("", "2025-08-04T10:02:00Z")));
        // Unparseable timestamp
        assert!(!is_valid(&Event::new("email", "invalid-time")));
    }

    #[test]
    fn test_filter_valid_events() {
        let events = vec![
            Event::new("email", "2025-08-04T10:00:00Z"),
            Event {
                service: None,
                timestamp: Some("2025-08-04T10:01:00Z".to_string()),
            },
            Event {
                service: Some("email".to_string()),
                timestamp: None,
            },
            Event::new("email", "invalid-time"),
            Event::new("", "2025-08-04T10:02:00Z"),
        ];

        let valid = filter_valid(&events);

        // Only 1 valid event
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].service, "email");
        assert_eq!(valid[0].timestamp, "2025-08-04T10:00:00Z");
    }

    #[test]
    fn test_filter_preserves_order() {
        let events = vec![
            Event::new("b", "2025-08-04T10:05:00Z"),
            Event::new("a", "garbage"),
            Event::new("a", "2025-08-04T10:00:00Z"),
            Event::new("b", "2025-08-04T09:00:00Z"),
        ];

        let valid: Vec<_> = filter_valid(&events)
            .into_iter()
            .map(|e| (e.service, e.timestamp))
            .collect();

        assert_eq!(
            valid,
            vec![
                ("b".to_string(), "2025-08-04T10:05:00Z".to_string()),
                ("a".to_string(), "2025-08-04T10:00:00Z".to_string()),
                ("b".to_string(), "2025-08-04T09:00:00Z".to_string()),
            ]
        );
    }
}
