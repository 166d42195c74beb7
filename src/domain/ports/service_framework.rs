use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::FrameworkError;

/// Options a framework has been configured with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Fully-qualified service name (`<namespace>.<name>`), empty until set
    pub name: String,

    pub version: String,

    /// Registration time-to-live
    pub register_ttl: Duration,

    /// Registration refresh interval
    pub register_interval: Duration,
}

/// Port trait for the microservice framework a service runs inside
///
/// The bootstrap sequence only needs to name the service, apply registry
/// timing and finally hand control to the serving loop. Transport, discovery
/// and handler wiring belong to the implementation.
#[async_trait]
pub trait ServiceFramework: Send + Sync {
    /// Version the service was built with
    fn version(&self) -> &str;

    /// Set the fully-qualified service name
    fn set_name(&mut self, name: &str);

    /// Set how long a registration stays valid
    fn set_register_ttl(&mut self, ttl: Duration);

    /// Set how often the registration is refreshed
    fn set_register_interval(&mut self, interval: Duration);

    /// Current options
    fn options(&self) -> ServiceOptions;

    /// Run the serving loop until shutdown
    async fn serve(&self) -> Result<(), FrameworkError>;
}
