//! Domain errors for microkit.

use std::path::PathBuf;

use thiserror::Error;

/// Format a list of searched paths as `a, b, c`.
fn format_search_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while locating or reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No candidate file exists in any search directory. Not fatal for `load`.
    #[error("Config file \"config\" not found in [{}]", format_search_paths(searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("Fatal error config file: {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Fatal error config file: cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// True for the one error kind `load` tolerates.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the object registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("object {key} is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// Errors raised by a service framework implementation.
#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("service name must be set before serving")]
    NameNotSet,

    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

/// Errors that abort the startup sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Configuration not initialized, check your config format")]
    NotInitialized,

    #[error("No name in configuration and no default name")]
    MissingName,

    #[error("service initialization failed: {0:#}")]
    Init(#[source] anyhow::Error),

    #[error(transparent)]
    Framework(#[from] FrameworkError),

    #[error("startup sequence already ran")]
    AlreadyStarted,
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
