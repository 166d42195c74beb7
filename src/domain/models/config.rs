use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Directory name used to locate the config file when no default name is given.
pub const DEFAULT_CONFIG_DIR: &str = "micro";

/// Namespace substituted when the configuration does not provide one.
pub const DEFAULT_NAMESPACE: &str = "com.example";

/// Base name of the config file (extension is detected).
pub const CONFIG_FILE_NAME: &str = "config";

/// Configuration keys read by microkit. Every other key is passed through untouched.
pub mod keys {
    pub const NAME: &str = "name";
    pub const NAMESPACE: &str = "namespace";
    pub const DATABASE_DRIVER: &str = "database_driver";
    pub const DATABASE_DATASOURCE: &str = "database_datasource";
    pub const REGISTER_TTL: &str = "micro_register_ttl";
    pub const REGISTER_INTERVAL: &str = "micro_register_interval";

    pub const ALL: [&str; 6] = [
        NAME,
        NAMESPACE,
        DATABASE_DRIVER,
        DATABASE_DATASOURCE,
        REGISTER_TTL,
        REGISTER_INTERVAL,
    ];
}

/// Resolved service identity and database settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceSettings {
    /// Service name, without namespace
    #[serde(default)]
    pub name: String,

    /// Namespace prefix for service names and broker topics
    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub database_driver: String,

    #[serde(default)]
    pub database_datasource: String,
}

impl ServiceSettings {
    /// `<namespace>.<name>`
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }

    /// `topic.<namespace>.<topic>`
    pub fn broker_topic(&self, topic: &str) -> String {
        format!("topic.{}.{}", self.namespace, topic)
    }
}

/// Registry timing applied to the service framework
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationTiming {
    /// How long a registration stays valid
    pub ttl: Duration,

    /// How often the registration is refreshed
    pub interval: Duration,
}

impl RegistrationTiming {
    /// Build from whole seconds. Negative values mean "unset" and become zero.
    pub fn from_secs(ttl: i64, interval: i64) -> Self {
        Self {
            ttl: secs_or_zero(ttl),
            interval: secs_or_zero(interval),
        }
    }
}

fn secs_or_zero(secs: i64) -> Duration {
    u64::try_from(secs).map_or(Duration::ZERO, Duration::from_secs)
}
