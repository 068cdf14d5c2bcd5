//! Heartbeat Monitor CLI
//!
//! Run with: cargo run -- [EVENTS_PATH]
//!
//! Environment variables:
//! - HEARTBEAT_EVENTS_PATH: Input file when no argument is given (default: events.json)
//! - HEARTBEAT_INTERVAL_SECS: Expected seconds between heartbeats (default: 60)
//! - HEARTBEAT_ALLOWED_MISSES: Misses tolerated before alerting (default: 3)
//! - RUST_LOG: Log level (default: info)
//!
//! Alerts are printed to stdout as a pretty JSON array; logs go to stderr.

use heartbeat_monitor::{detect_alerts_with_config, load_events, MonitorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heartbeat_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let events_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HEARTBEAT_EVENTS_PATH").ok())
        .unwrap_or_else(|| "events.json".to_string());

    let config = MonitorConfig::from_env();

    tracing::info!("Heartbeat monitor configuration:");
    tracing::info!("  Events: {}", events_path);
    tracing::info!("  Interval: {} seconds", config.interval_seconds);
    tracing::info!("  Allowed misses: {}", config.allowed_misses);

    let events = load_events(&events_path).map_err(|e| {
        tracing::error!(path = %events_path, error = %e, "Failed to load events");
        e
    })?;

    let alerts = detect_alerts_with_config(&config, &events)?;

    tracing::info!(
        events = events.len(),
        alerts = alerts.len(),
        "Detection finished"
    );

    println!("{}", serde_json::to_string_pretty(&alerts)?);

    Ok(())
}
