//! Microkit - configuration and startup glue for microservices
//!
//! Microkit loads layered configuration (a `config` file found on a search
//! path, overridden by environment variables) into a process-wide store and
//! runs a fixed startup sequence that names the service, applies registry
//! timing to the service framework and then hands the store to the service's
//! own initialization code.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Settings and lifecycle models, errors, ports
//! - **Service Layer** (`services`): Configuration store, object registry,
//!   startup sequence
//! - **Infrastructure Layer** (`infrastructure`): figment loader, logging,
//!   in-process service framework
//! - **CLI Layer** (`cli`): Command-line driver
//!
//! # Example
//!
//! ```no_run
//! use microkit::services::new_service;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = new_service("1.0.0", "billing", |conf| {
//!         conf.set_object("topic", conf.broker_topic("invoices"));
//!         Ok(())
//!     });
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{RegistrationTiming, ServiceSettings, StartupState};
pub use domain::ports::{ConfigSource, ServiceFramework, ServiceOptions};
pub use domain::{BootstrapError, ConfigError, FrameworkError, RegistryError};
pub use infrastructure::config::{ConfigLoader, SearchPaths};
pub use services::{
    new_service, nil_init, ConfigurationStore, ObjectKey, Service, ServiceBootstrapper,
};
