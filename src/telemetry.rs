//! Application telemetry events and sinks.
//!
//! Events are structured records of page loads and failed actions. They are
//! never transmitted; the stderr sink exists for local debugging.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A structured telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A screen finished its parallel load.
    PageLoaded {
        /// Screen name such as `detail` or `profile`.
        page: String,
        /// Wall-clock time from first request to applied results.
        latency_ms: u64,
        /// Number of resources that failed to load.
        failed_resources: u32,
    },
    /// A user action failed and the view was left unchanged.
    ActionFailed {
        /// Action name such as `submit_review`.
        action: String,
        /// Error description.
        message: String,
    },
}

impl TelemetryEvent {
    /// Builds a page-loaded event from an elapsed duration.
    #[must_use]
    pub fn page_loaded(page: &str, elapsed: Duration, failed_resources: u32) -> Self {
        Self::PageLoaded {
            page: page.to_owned(),
            latency_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            failed_resources,
        }
    }

    /// Builds an action-failed event.
    #[must_use]
    pub fn action_failed(action: &str, error: &impl std::fmt::Display) -> Self {
        Self::ActionFailed {
            action: action.to_owned(),
            message: error.to_string(),
        }
    }
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Writes each event to stderr as one JSON line, for local debugging.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => {
                if let Err(error) = writeln!(io::stderr().lock(), "{line}") {
                    debug!(error = %error, "telemetry line dropped");
                }
            }
            Err(error) => debug!(error = %error, "telemetry event could not be encoded"),
        }
    }
}
