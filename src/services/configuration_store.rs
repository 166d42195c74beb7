//! Process-wide configuration store
//!
//! Holds the resolved service identity, typed access to every other
//! configuration key, and the object registry shared across initialization
//! steps. One global instance is created lazily through
//! [`ConfigurationStore::global`]; explicit instances can be built with
//! [`ConfigurationStore::new`] and injected where needed.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use crate::domain::models::{keys, RegistrationTiming, ServiceSettings, DEFAULT_NAMESPACE};
use crate::domain::ports::{ConfigSource, EmptySource};
use crate::domain::{ConfigError, RegistryError};
use crate::infrastructure::config::{ConfigLoader, SearchPaths};
use crate::services::object_registry::{ObjectKey, ObjectRegistry};

static GLOBAL_STORE: OnceLock<Arc<ConfigurationStore>> = OnceLock::new();

#[cfg(test)]
static GLOBAL_CONSTRUCTIONS: std::sync::atomic::AtomicUsize =
    std::sync::atomic::AtomicUsize::new(0);

struct Resolved {
    settings: ServiceSettings,
    source: Arc<dyn ConfigSource>,
}

impl Default for Resolved {
    fn default() -> Self {
        Self {
            settings: ServiceSettings::default(),
            source: Arc::new(EmptySource),
        }
    }
}

/// Resolved configuration plus the shared object registry
#[derive(Default)]
pub struct ConfigurationStore {
    resolved: RwLock<Resolved>,
    initialized: AtomicBool,
    objects: ObjectRegistry,
}

impl ConfigurationStore {
    /// Create an empty, uninitialized store
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store, created on first access
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL_STORE.get_or_init(|| {
            #[cfg(test)]
            GLOBAL_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            Arc::new(Self::new())
        }))
    }

    /// Load configuration for a service
    ///
    /// `default_name` picks the search directories (`/etc/<name>/`,
    /// `~/.<name>`, `.`); an empty name searches for `micro`. It never
    /// becomes the service name here.
    ///
    /// # Errors
    /// `ConfigError::Parse` for a malformed file and `ConfigError::Read` for
    /// an unreadable one. A missing file is not an error.
    pub fn load(&self, default_name: &str) -> Result<(), ConfigError> {
        self.load_with(&SearchPaths::for_name(default_name))
    }

    /// Load configuration from an explicit search path
    #[instrument(skip(self), fields(dirs = ?paths.dirs()))]
    pub fn load_with(&self, paths: &SearchPaths) -> Result<(), ConfigError> {
        let source = ConfigLoader::load(paths)?;
        self.load_from_source(Arc::new(source));
        Ok(())
    }

    /// Populate the store from an already resolved source and mark it initialized
    pub fn load_from_source(&self, source: Arc<dyn ConfigSource>) {
        let string = |key: &str| source.get_string(key).unwrap_or_default();

        let mut settings = ServiceSettings {
            name: string(keys::NAME),
            namespace: string(keys::NAMESPACE),
            database_driver: string(keys::DATABASE_DRIVER),
            database_datasource: string(keys::DATABASE_DATASOURCE),
        };

        // Empty or absent namespace falls back to the default
        if settings.namespace.is_empty() {
            settings.namespace = DEFAULT_NAMESPACE.to_string();
        }

        info!(
            name = %settings.name,
            namespace = %settings.namespace,
            database_driver = %settings.database_driver,
            "configuration loaded"
        );

        *self.write() = Resolved { settings, source };
        self.initialized.store(true, Ordering::Release);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Snapshot of the resolved identity and database settings
    pub fn settings(&self) -> ServiceSettings {
        self.read().settings.clone()
    }

    pub fn name(&self) -> String {
        self.read().settings.name.clone()
    }

    pub(crate) fn set_name(&self, name: &str) {
        self.write().settings.name = name.to_string();
    }

    pub fn namespace(&self) -> String {
        self.read().settings.namespace.clone()
    }

    pub fn database_driver(&self) -> String {
        self.read().settings.database_driver.clone()
    }

    pub fn database_datasource(&self) -> String {
        self.read().settings.database_datasource.clone()
    }

    /// `topic.<namespace>.<topic>`
    pub fn broker_topic(&self, topic: &str) -> String {
        self.read().settings.broker_topic(topic)
    }

    /// `<namespace>.<name>`
    pub fn service_name(&self, name: &str) -> String {
        self.read().settings.qualified_name(name)
    }

    /// Registration TTL and refresh interval, zero when not configured
    pub fn registration_timing(&self) -> RegistrationTiming {
        let ttl = self.get_int(keys::REGISTER_TTL);
        let interval = self.get_int(keys::REGISTER_INTERVAL);
        if ttl < 0 || interval < 0 {
            warn!(ttl, interval, "negative registration timing treated as zero");
        }
        RegistrationTiming::from_secs(ttl, interval)
    }

    /// String value of `key`, empty when absent
    pub fn get_string(&self, key: &str) -> String {
        self.source().get_string(key).unwrap_or_default()
    }

    /// Integer value of `key`, zero when absent or not an integer
    pub fn get_int(&self, key: &str) -> i64 {
        self.source().get_int(key).unwrap_or_default()
    }

    /// Boolean value of `key`, false when absent
    pub fn get_bool(&self, key: &str) -> bool {
        self.source().get_bool(key).unwrap_or_default()
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.source().contains(key)
    }

    /// Deserialize any value, including maps and lists
    pub fn get_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.source().get_json(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "config value has unexpected shape");
                None
            }
        }
    }

    /// Top-level keys of the resolved configuration
    pub fn keys(&self) -> Vec<String> {
        self.source().keys()
    }

    /// Register an object, replacing any previous one under `key`
    pub fn set_object<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.objects.set(key, value);
    }

    /// Fetch a registered object
    pub fn get_object<T>(&self, key: &str) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        self.objects.get(key)
    }

    pub fn set_typed<T>(&self, key: &ObjectKey<T>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.objects.set_typed(key, value);
    }

    pub fn get_typed<T>(&self, key: &ObjectKey<T>) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        self.objects.get_typed(key)
    }

    pub const fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    fn source(&self) -> Arc<dyn ConfigSource> {
        Arc::clone(&self.read().source)
    }

    fn read(&self) -> RwLockReadGuard<'_, Resolved> {
        self.resolved.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Resolved> {
        self.resolved.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ConfigurationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationStore")
            .field("settings", &self.read().settings)
            .field("initialized", &self.is_initialized())
            .field("objects", &self.objects)
            .finish()
    }
}
