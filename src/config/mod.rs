//! Configuration loading and persistence.
//!
//! Handles the per-user `config.json`, environment variable overrides,
//! and compiled-in defaults.

pub mod store;

pub use store::{ConfigError, Settings};
