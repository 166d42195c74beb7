//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces infrastructure adapters implement:
//! - ConfigSource: Read access to resolved configuration values
//! - ServiceFramework: The framework a service registers with and serves from
//!
//! The bootstrap sequence depends only on these traits.

pub mod config_source;
pub mod service_framework;

pub use config_source::{ConfigSource, EmptySource};
pub use service_framework::{ServiceFramework, ServiceOptions};
