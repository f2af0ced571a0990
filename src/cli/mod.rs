//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`auth`]: Signing in, signing up and signing out
//! - [`browse`]: Home lists and title search
//! - [`movie`]: Movie detail and review changes
//! - [`profile`]: Profiles, following and avatar upload
//! - [`interactive`]: The terminal UI
//!
//! Output formatting utilities are in [`output`].

pub mod auth;
pub mod browse;
pub mod interactive;
pub mod movie;
pub mod output;
pub mod profile;
