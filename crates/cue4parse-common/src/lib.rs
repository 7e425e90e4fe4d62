//! CUE4Parse Common - Shared types and utilities
//!
//! This crate provides the error type, configuration structures and the
//! small value types (game versions, AES keys, export formats) used by the
//! provider and the admin CLI.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, LoggingConfig, ProviderConfig, ToolConfig};
pub use error::{Error, Result};
pub use types::*;
