//! Marquee library crate: a terminal client for a movie discovery and review
//! service.
//!
//! The library wraps the service's HTTP API behind typed gateways, aggregates
//! the requests each screen needs into page state, and renders that state for
//! the one-shot CLI modes and the interactive terminal UI.

pub mod api;
pub mod config;
pub mod i18n;
pub mod pages;
pub mod telemetry;
pub mod tui;

pub use api::{ApiError, Backend, HttpGateway};
pub use config::{MarqueeConfig, OperationMode};
