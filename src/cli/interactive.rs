//! TUI mode for browsing movies.
//!
//! This module provides the entry point for the interactive terminal user
//! interface.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use marquee::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use marquee::tui::{MarqueeApp, TuiContext, set_tui_context};
use marquee::{ApiError, HttpGateway, MarqueeConfig};
use tracing::debug;

/// Runs the TUI with `gateway`, which may already hold a session cookie.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] for an unknown locale, or
/// [`ApiError::Io`] if the TUI fails to initialise.
pub async fn run(config: &MarqueeConfig, gateway: HttpGateway) -> Result<(), ApiError> {
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };
    let context = TuiContext::new(gateway, config.locale()?).with_telemetry(telemetry);

    // A context stored by an earlier run in this process stays in place.
    if !set_tui_context(context) {
        debug!("service context already set; keeping the existing one");
    }

    run_tui().await.map_err(|error| ApiError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `MarqueeApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // MarqueeApp::init() reads the service context from module-level storage.
    let program = Program::<MarqueeApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
