//! Domain layer for microkit
//!
//! This module contains the configuration and lifecycle models, error types
//! and the ports infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{BootstrapError, BootstrapResult, ConfigError, FrameworkError, RegistryError};
