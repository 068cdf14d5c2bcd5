//! Heartbeat Monitor: Batch Gap Detection for Service Heartbeats
//!
//! Evaluates a batch of heartbeat events emitted by named services and reports
//! services that went silent for longer than a tolerated number of intervals.
//!
//! # Pipeline
//!
//! - **Validation**: drop events without a service or a parseable timestamp
//! - **Grouping**: partition heartbeats per service, in first-seen order
//! - **Sorting**: order each service's heartbeats by parsed instant
//! - **Gap Detection**: one alert per gap that reaches the miss tolerance
//!
//! # Example
//!
//! ```
//! use heartbeat_monitor::{detect_alerts, Event};
//!
//! let events = vec![
//!     Event::new("email", "2025-08-04T10:00:00Z"),
//!     Event::new("email", "2025-08-04T10:01:00Z"),
//!     Event::new("email", "2025-08-04T10:02:00Z"),
//!     Event::new("email", "2025-08-04T10:06:00Z"),
//! ];
//!
//! let alerts = detect_alerts(&events, 60.0, 3).unwrap();
//! assert_eq!(alerts.len(), 1);
//! assert_eq!(alerts[0].alert_at_string(), "2025-08-04T10:05:00Z");
//! ```

pub mod alerts;
pub mod event;
pub mod ingest;
pub mod timeline;

// Re-export commonly used types
pub use alerts::{detect_alerts, detect_alerts_with_config, Alert, ConfigError, MonitorConfig};
pub use event::{Event, ValidatedEvent};
pub use ingest::{load_events, IngestError};
pub use timeline::{group_by_service, ServiceTimeline};
