//! Service startup sequence
//!
//! Loads the configuration store, validates it, names the service, applies
//! registry timing to the framework and finally runs the caller's
//! initialization callback. The steps run once, in order, and the first
//! failure aborts the rest.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::models::StartupState;
use crate::domain::ports::ServiceFramework;
use crate::domain::{BootstrapError, BootstrapResult};
use crate::services::configuration_store::ConfigurationStore;

/// Initialization callback run once the store is populated
pub type InitFn = Box<dyn FnOnce(&ConfigurationStore) -> anyhow::Result<()> + Send>;

/// Callback for services with nothing to initialize
#[allow(clippy::unnecessary_wraps)]
pub fn nil_init(_store: &ConfigurationStore) -> anyhow::Result<()> {
    Ok(())
}

/// Runs the startup sequence for one service
pub struct ServiceBootstrapper {
    version: String,
    default_name: String,
    init_fn: Option<InitFn>,
    store: Option<Arc<ConfigurationStore>>,
    state: StartupState,
}

impl ServiceBootstrapper {
    pub fn new<F>(version: impl Into<String>, default_name: impl Into<String>, init_fn: F) -> Self
    where
        F: FnOnce(&ConfigurationStore) -> anyhow::Result<()> + Send + 'static,
    {
        Self {
            version: version.into(),
            default_name: default_name.into(),
            init_fn: Some(Box::new(init_fn)),
            store: None,
            state: StartupState::NotStarted,
        }
    }

    /// Use `store` instead of the process-wide one
    #[must_use]
    pub fn with_store(mut self, store: Arc<ConfigurationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub const fn state(&self) -> &StartupState {
        &self.state
    }

    /// The store this bootstrapper populates
    pub fn store(&self) -> Arc<ConfigurationStore> {
        self.store
            .as_ref()
            .map_or_else(ConfigurationStore::global, Arc::clone)
    }

    /// Execute the startup sequence against `framework`
    ///
    /// 1. Load the store using the default name for the search path
    /// 2. Check the store is initialized
    /// 3. Resolve the service name (config `name`, else the default name)
    /// 4. Set `<namespace>.<name>` as the framework's service name
    /// 5. Apply `micro_register_ttl` / `micro_register_interval`
    /// 6. Run the initialization callback
    ///
    /// # Errors
    /// The first failing step's error. A bootstrapper runs at most once; a
    /// second call fails with `BootstrapError::AlreadyStarted`.
    #[instrument(skip(self, framework), fields(version = %self.version, default_name = %self.default_name))]
    pub fn run<F>(&mut self, framework: &mut F) -> BootstrapResult<()>
    where
        F: ServiceFramework + ?Sized,
    {
        if self.state != StartupState::NotStarted {
            return Err(BootstrapError::AlreadyStarted);
        }

        let result = self.run_steps(framework);
        if let Err(ref err) = result {
            self.state = StartupState::Failed(err.to_string());
        }
        result
    }

    fn run_steps<F>(&mut self, framework: &mut F) -> BootstrapResult<()>
    where
        F: ServiceFramework + ?Sized,
    {
        let store = self.store();

        self.advance(StartupState::ConfigLoading);
        if let Err(err) = store.load(&self.default_name) {
            error!(error = %err, "failed to load configuration");
            return Err(err.into());
        }

        if !store.is_initialized() {
            let err = BootstrapError::NotInitialized;
            error!(error = %err, "configuration rejected");
            return Err(err);
        }
        self.advance(StartupState::ConfigValidated);

        let name = self.resolve_name(&store)?;
        self.advance(StartupState::NameResolved);

        let service_name = store.service_name(&name);
        framework.set_name(&service_name);

        let timing = store.registration_timing();
        framework.set_register_ttl(timing.ttl);
        framework.set_register_interval(timing.interval);
        self.advance(StartupState::FrameworkConfigured);

        info!(
            service = %service_name,
            version = %framework.version(),
            register_ttl = ?timing.ttl,
            register_interval = ?timing.interval,
            "service configured"
        );

        self.advance(StartupState::UserInitRunning);
        let init_fn = self
            .init_fn
            .take()
            .unwrap_or_else(|| Box::new(nil_init) as InitFn);
        if let Err(err) = init_fn(store.as_ref()) {
            let err = BootstrapError::Init(err);
            error!(error = %err, "service initialization failed");
            return Err(err);
        }

        self.advance(StartupState::Ready);
        info!(service = %service_name, "service ready");
        Ok(())
    }

    /// Configured name, falling back to the default name
    fn resolve_name(&self, store: &ConfigurationStore) -> BootstrapResult<String> {
        let configured = store.name();
        if !configured.is_empty() {
            return Ok(configured);
        }

        if self.default_name.is_empty() {
            let err = BootstrapError::MissingName;
            error!(error = %err, "cannot name service");
            return Err(err);
        }

        store.set_name(&self.default_name);
        Ok(self.default_name.clone())
    }

    fn advance(&mut self, next: StartupState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid startup transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
    }
}

impl std::fmt::Debug for ServiceBootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceBootstrapper")
            .field("version", &self.version)
            .field("default_name", &self.default_name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
