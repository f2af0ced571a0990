//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `operation_mode`: Operation mode determination tests
//! - `resolution`: Typed accessors and validation
//! - `loading`: End-to-end loading from environment and CLI

mod helpers;
