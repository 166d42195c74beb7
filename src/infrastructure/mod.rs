//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters:
//! - Configuration loading (figment)
//! - Logging infrastructure
//! - Service framework implementations
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod framework;
pub mod logging;
