use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::info;

use crate::domain::ports::{ServiceFramework, ServiceOptions};
use crate::domain::FrameworkError;

/// Requests a serving `LocalService` to stop
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<Notify>);

impl ShutdownHandle {
    /// Stop the service. Calling this before `serve` makes `serve` return
    /// immediately.
    pub fn shutdown(&self) {
        self.0.notify_one();
    }
}

/// In-process service framework
///
/// Records the options applied during startup and serves until shutdown is
/// requested or the process receives Ctrl-C. It owns no transport or registry.
#[derive(Debug)]
pub struct LocalService {
    options: ServiceOptions,
    shutdown: Arc<Notify>,
}

impl LocalService {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            options: ServiceOptions {
                version: version.into(),
                ..Default::default()
            },
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }
}

#[async_trait]
impl ServiceFramework for LocalService {
    fn version(&self) -> &str {
        &self.options.version
    }

    fn set_name(&mut self, name: &str) {
        self.options.name = name.to_string();
    }

    fn set_register_ttl(&mut self, ttl: Duration) {
        self.options.register_ttl = ttl;
    }

    fn set_register_interval(&mut self, interval: Duration) {
        self.options.register_interval = interval;
    }

    fn options(&self) -> ServiceOptions {
        self.options.clone()
    }

    async fn serve(&self) -> Result<(), FrameworkError> {
        if self.options.name.is_empty() {
            return Err(FrameworkError::NameNotSet);
        }

        info!(
            service = %self.options.name,
            version = %self.options.version,
            "service started"
        );

        tokio::select! {
            () = self.shutdown.notified() => {
                info!(service = %self.options.name, "shutdown requested");
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!(service = %self.options.name, "received interrupt, stopping");
            }
        }

        Ok(())
    }
}
