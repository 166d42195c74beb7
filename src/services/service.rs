//! Service entry point
//!
//! Couples a service framework with the startup sequence. The sequence runs
//! synchronously before the framework's serving loop takes over.

use std::sync::Arc;

use tracing::info;

use crate::domain::models::StartupState;
use crate::domain::ports::ServiceFramework;
use crate::domain::BootstrapResult;
use crate::infrastructure::framework::LocalService;
use crate::services::bootstrapper::ServiceBootstrapper;
use crate::services::configuration_store::ConfigurationStore;

/// A framework plus the startup sequence that configures it
#[derive(Debug)]
pub struct Service<F: ServiceFramework> {
    framework: F,
    bootstrapper: ServiceBootstrapper,
}

/// Build a service on the in-process framework using the global store
///
/// `default_name` locates the config file and names the service when the
/// configuration has no `name`.
pub fn new_service<I>(version: &str, default_name: &str, init_fn: I) -> Service<LocalService>
where
    I: FnOnce(&ConfigurationStore) -> anyhow::Result<()> + Send + 'static,
{
    Service::new(
        LocalService::new(version),
        ServiceBootstrapper::new(version, default_name, init_fn),
    )
}

impl<F: ServiceFramework> Service<F> {
    pub const fn new(framework: F, bootstrapper: ServiceBootstrapper) -> Self {
        Self {
            framework,
            bootstrapper,
        }
    }

    /// Run the startup sequence without serving
    pub fn init(&mut self) -> BootstrapResult<()> {
        self.bootstrapper.run(&mut self.framework)
    }

    /// Start up (unless `init` already succeeded) and serve until shutdown
    pub async fn run(mut self) -> BootstrapResult<()> {
        if !self.bootstrapper.state().is_ready() {
            self.init()?;
        }
        self.framework.serve().await?;
        info!(service = %self.framework.options().name, "service stopped");
        Ok(())
    }

    pub const fn framework(&self) -> &F {
        &self.framework
    }

    pub fn store(&self) -> Arc<ConfigurationStore> {
        self.bootstrapper.store()
    }

    pub const fn state(&self) -> &StartupState {
        self.bootstrapper.state()
    }
}
