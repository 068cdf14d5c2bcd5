//! Heartbeat outage alerting
//!
//! Gap detection over per-service timelines with a configurable interval and
//! miss tolerance.

pub mod config;
pub mod detector;

pub use config::{Alert, ConfigError, MonitorConfig};
pub use detector::{detect_alerts, detect_alerts_with_config, detect_gaps, missed_heartbeats};
