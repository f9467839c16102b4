//! redline — AI code review service and CLI (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod client;
pub mod config;
pub mod constants;
pub mod env;
pub mod invoker;
pub mod models;
pub mod prompt;
pub mod service;
