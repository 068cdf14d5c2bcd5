//! Alert and monitor configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default expected seconds between heartbeats
pub const DEFAULT_INTERVAL_SECS: f64 = 60.0;
/// Default number of consecutive misses tolerated before alerting
pub const DEFAULT_ALLOWED_MISSES: u32 = 3;

/// An outage alert for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Service that went silent
    pub service: String,
    /// Instant the alert should have fired
    #[serde(with = "alert_time_serde")]
    pub alert_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(service: impl Into<String>, alert_at: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            alert_at,
        }
    }

    /// `alert_at` rendered with a trailing `Z`
    pub fn alert_at_string(&self) -> String {
        alert_time_serde::format(&self.alert_at)
    }
}

/// Gap detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Expected seconds between consecutive heartbeats
    pub interval_seconds: f64,
    /// Consecutive misses tolerated before an alert
    pub allowed_misses: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECS,
            allowed_misses: DEFAULT_ALLOWED_MISSES,
        }
    }
}

impl MonitorConfig {
    pub fn new(interval_seconds: f64, allowed_misses: u32) -> Self {
        Self {
            interval_seconds,
            allowed_misses,
        }
    }

    /// Set the expected heartbeat interval
    pub fn with_interval(mut self, interval_seconds: f64) -> Self {
        self.interval_seconds = interval_seconds;
        self
    }

    /// Set the miss tolerance
    pub fn with_allowed_misses(mut self, allowed_misses: u32) -> Self {
        self.allowed_misses = allowed_misses;
        self
    }

    /// Load from environment, falling back to defaults
    ///
    /// - HEARTBEAT_INTERVAL_SECS: expected interval (default: 60)
    /// - HEARTBEAT_ALLOWED_MISSES: miss tolerance (default: 3)
    pub fn from_env() -> Self {
        let interval_seconds = std::env::var("HEARTBEAT_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        let allowed_misses = std::env::var("HEARTBEAT_ALLOWED_MISSES")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_ALLOWED_MISSES);

        Self {
            interval_seconds,
            allowed_misses,
        }
    }

    /// Reject parameters the gap arithmetic cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.interval_seconds.is_finite() || self.interval_seconds <= 0.0 {
            return Err(ConfigError::InvalidInterval(self.interval_seconds));
        }
        if self.allowed_misses == 0 {
            return Err(ConfigError::InvalidAllowedMisses);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Heartbeat interval must be a positive number of seconds, got {0}")]
    InvalidInterval(f64),

    #[error("Allowed misses must be at least 1")]
    InvalidAllowedMisses,
}

/// `DateTime<Utc>` as ISO-8601 with a `Z` suffix
///
/// Whole seconds print without a fraction; otherwise microseconds are shown.
mod alert_time_serde {
    use chrono::{DateTime, Timelike, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(dt: &DateTime<Utc>) -> String {
        if dt.nanosecond() == 0 {
            dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
        } else {
            dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
        }
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
