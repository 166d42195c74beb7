use std::path::{Path, PathBuf};

use figment::value::Dict;
use figment::Figment;
use serde_json::Value;

use crate::domain::ports::ConfigSource;

/// `ConfigSource` adapter over a merged figment
pub struct FigmentSource {
    figment: Figment,
    origin: Option<PathBuf>,
    listed_keys: Option<Vec<String>>,
}

impl FigmentSource {
    pub const fn new(figment: Figment, origin: Option<PathBuf>) -> Self {
        Self {
            figment,
            origin,
            listed_keys: None,
        }
    }

    /// Restrict `keys()` to `keys`; lookups still see every layer
    #[must_use]
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.listed_keys = Some(keys);
        self
    }

    /// Path of the config file the values came from, if any
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub const fn figment(&self) -> &Figment {
        &self.figment
    }
}

impl ConfigSource for FigmentSource {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get_json(key)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get_json(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_json(key)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_i64().map(|i| i != 0),
            _ => None,
        }
    }

    fn get_json(&self, key: &str) -> Option<Value> {
        match self.figment.extract_inner::<Value>(key) {
            Ok(Value::Null) | Err(_) => None,
            Ok(value) => Some(value),
        }
    }

    fn keys(&self) -> Vec<String> {
        if let Some(ref keys) = self.listed_keys {
            return keys.clone();
        }
        self.figment
            .extract::<Dict>()
            .map(|dict| dict.into_keys().collect())
            .unwrap_or_default()
    }
}
