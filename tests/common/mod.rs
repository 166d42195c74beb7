//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use microkit::ConfigSource;
use serde_json::Value;
use tempfile::TempDir;

/// Keys read by microkit; unset for every isolated test so the host
/// environment cannot leak into assertions.
const MANAGED_VARS: [&str; 6] = [
    "NAME",
    "NAMESPACE",
    "MICRO_REGISTER_TTL",
    "MICRO_REGISTER_INTERVAL",
    "DATABASE_DRIVER",
    "DATABASE_DATASOURCE",
];

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `dir/relative`, creating parent directories.
pub fn write_config(dir: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create config dir");
    }
    fs::write(&path, contents).expect("Failed to write config file");
    path
}

/// Run `f` with `HOME` pointed at `home`, every managed variable unset,
/// then `overrides` applied.
///
/// temp-env serializes these calls, so tests touching the environment do
/// not race each other.
pub fn with_isolated_env<R>(home: &Path, overrides: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let mut vars: Vec<(String, Option<String>)> = vec![(
        "HOME".to_string(),
        Some(home.to_string_lossy().into_owned()),
    )];
    vars.extend(MANAGED_VARS.iter().map(|k| ((*k).to_string(), None)));
    vars.extend(
        overrides
            .iter()
            .map(|(k, v)| ((*k).to_string(), Some((*v).to_string()))),
    );

    temp_env::with_vars(vars, f)
}

/// In-memory `ConfigSource` for tests that bypass file loading
#[allow(dead_code)]
#[derive(Default)]
pub struct MapSource {
    values: HashMap<String, Value>,
}

#[allow(dead_code)]
impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl ConfigSource for MapSource {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key)?.as_i64()
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    fn get_json(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
