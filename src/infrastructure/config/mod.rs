//! Configuration management infrastructure
//!
//! Layered configuration using figment:
//! - `config.{json,toml,yaml,yml}` discovery over a search path
//! - Environment variable overrides
//! - `ConfigSource` adapter for the configuration store

pub mod figment_source;
pub mod loader;

pub use figment_source::FigmentSource;
pub use loader::{ConfigFile, ConfigFormat, ConfigLoader, SearchPaths};
