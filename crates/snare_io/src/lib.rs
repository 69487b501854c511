//! # Snare IO
//!
//! Persistence layer for trap configuration.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - A TOML config store with atomic saves and corrupt-file fallback

/// Loading, saving and reloading the trap config file
pub mod config_store;
/// Error types and result aliases for I/O operations
pub mod error;

pub use config_store::{ConfigStore, DEFAULT_CONFIG_FILE};
pub use error::{IoError, Result};
