//! Heartbeat gap detection
//!
//! Each consecutive pair of heartbeats is checked for how many expected beats
//! fell between them. A pair whose miss count reaches the tolerance yields one
//! alert at `t_i + allowed_misses * interval`.

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;

use super::config::{Alert, ConfigError, MonitorConfig};
use crate::event::{filter_valid, Event, ValidatedEvent};
use crate::timeline::group_by_service;

/// Count heartbeats skipped inside a gap
///
/// An exact multiple of the interval counts the whole intervals minus the
/// closing beat; any remainder counts as one more missed beat.
pub fn missed_heartbeats(gap_seconds: f64, interval_seconds: f64) -> i64 {
    let remainder = gap_seconds % interval_seconds;
    // Floor division derived from the remainder keeps the two consistent
    let whole = ((gap_seconds - remainder) / interval_seconds).round();
    let partial = if remainder != 0.0 { 1 } else { 0 };

    whole as i64 - 1 + partial
}

/// Elapsed seconds between two instants, microsecond precision
fn gap_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Offset from the last heartbeat to the nominal alert instant
///
/// `None` for a non-positive or non-finite interval.
fn alert_offset(interval_seconds: f64, allowed_misses: u32) -> Option<Duration> {
    if !interval_seconds.is_finite() || interval_seconds <= 0.0 {
        return None;
    }
    let micros = (allowed_misses as f64 * interval_seconds * 1_000_000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(micros as i64))
}

/// Detect alert-worthy gaps in one service's chronologically sorted heartbeats
///
/// Emits at most one alert per consecutive pair. Never fails: a degenerate
/// interval simply produces no alerts.
pub fn detect_gaps(
    service: &str,
    sorted_heartbeats: &[ValidatedEvent],
    interval_seconds: f64,
    allowed_misses: u32,
) -> Vec<Alert> {
    let Some(offset) = alert_offset(interval_seconds, allowed_misses) else {
        return Vec::new();
    };

    let mut alerts = Vec::new();

    for pair in sorted_heartbeats.windows(2) {
        let (current, next) = (pair[0].instant, pair[1].instant);
        let missed = missed_heartbeats(gap_seconds(current, next), interval_seconds);

        if missed < allowed_misses as i64 {
            continue;
        }

        match current.checked_add_signed(offset) {
            Some(alert_at) => {
                tracing::trace!(
                    service = %service,
                    missed,
                    alert_at = %alert_at,
                    "Heartbeat gap exceeds tolerance"
                );
                alerts.push(Alert::new(service, alert_at));
            }
            None => {
                tracing::warn!(
                    service = %service,
                    heartbeat = %current,
                    "Alert instant out of range, skipping"
                );
            }
        }
    }

    alerts
}

/// Run the full pipeline with an explicit configuration
///
/// Invalid events are dropped, the rest grouped per service and sorted, and
/// each service is scanned independently. Alerts come back grouped by service
/// in first-seen order, chronological within a service.
pub fn detect_alerts_with_config(
    config: &MonitorConfig,
    events: &[Event],
) -> Result<Vec<Alert>, ConfigError> {
    config.validate()?;

    let valid = filter_valid(events);
    let valid_count = valid.len();

    let mut timeline = group_by_service(valid);
    timeline.sort_chronologically();

    let per_service: Vec<Vec<Alert>> = timeline
        .partitions()
        .par_iter()
        .map(|(service, heartbeats)| {
            detect_gaps(
                service,
                heartbeats,
                config.interval_seconds,
                config.allowed_misses,
            )
        })
        .collect();

    let alerts: Vec<Alert> = per_service.into_iter().flatten().collect();

    tracing::debug!(
        events = events.len(),
        valid = valid_count,
        services = timeline.len(),
        alerts = alerts.len(),
        "Heartbeat gap detection complete"
    );

    Ok(alerts)
}

/// Detect heartbeat alerts across all services
pub fn detect_alerts(
    events: &[Event],
    interval_seconds: f64,
    allowed_misses: u32,
) -> Result<Vec<Alert>, ConfigError> {
    detect_alerts_with_config(&MonitorConfig::new(interval_seconds, allowed_misses), events)
}
