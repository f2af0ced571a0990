//! Terminal user interface for browsing movies, reviewing and following.
//!
//! The TUI follows the Model-View-Update (MVU) pattern of bubbletea-rs:
//!
//! - **Model**: Application state in [`app::MarqueeApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model, routing and screen state
//! - [`messages`]: Message types for the update loop
//! - [`components`]: Stateless renderers for each screen
//! - [`input`]: Context-aware key-to-message mapping
//!
//! # Service Context
//!
//! bubbletea-rs builds the model through the static `Model::init()`, so the
//! gateway, display language and telemetry sink are stored at module level.
//! Call [`set_tui_context`] before starting the program; commands issued by
//! the model read it back to reach the service.

use std::sync::{Arc, OnceLock};

use crate::api::{Backend, HttpGateway};
use crate::i18n::Locale;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

pub mod app;
pub mod components;
pub mod input;
pub mod messages;

pub use app::{MarqueeApp, Route};

/// Global storage for the service context.
static TUI_CONTEXT: OnceLock<TuiContext> = OnceLock::new();

/// Everything the update loop needs to talk to the service.
#[derive(Clone)]
pub struct TuiContext {
    gateway: Arc<HttpGateway>,
    locale: Locale,
    telemetry: Arc<dyn TelemetrySink>,
}

impl TuiContext {
    /// Creates a context for `gateway`, dropping telemetry.
    #[must_use]
    pub fn new(gateway: HttpGateway, locale: Locale) -> Self {
        Self {
            gateway: Arc::new(gateway),
            locale,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Borrows the gateway as a [`Backend`].
    #[must_use]
    pub fn backend(&self) -> Backend<'_> {
        Backend::from_gateway(self.gateway.as_ref())
    }

    /// Display language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

impl std::fmt::Debug for TuiContext {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TuiContext")
            .field("base", self.gateway.base())
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Stores the service context for the TUI.
///
/// This must be called before starting the bubbletea-rs program.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_tui_context(context: TuiContext) -> bool {
    TUI_CONTEXT.set(context).is_ok()
}

/// Returns the stored context, if any.
pub(crate) fn tui_context() -> Option<&'static TuiContext> {
    TUI_CONTEXT.get()
}

/// Display language from the stored context, English when unset.
pub(crate) fn context_locale() -> Locale {
    tui_context().map(TuiContext::locale).unwrap_or_default()
}

/// Records a telemetry event through the stored sink, if any.
pub(crate) fn record_telemetry(event: TelemetryEvent) {
    if let Some(context) = tui_context() {
        context.telemetry.record(event);
    }
}
