use serde_json::Value;

/// Port trait for a resolved, read-only configuration source
///
/// The configuration store only talks to its data through this trait, so the
/// loader backing it (figment today) can be swapped without touching the
/// store or the bootstrap sequence.
///
/// Lookups use dotted keys (`database.driver`) for nested values. A key that
/// is missing, or whose value cannot be represented as the requested type,
/// yields `None`.
pub trait ConfigSource: Send + Sync {
    /// Look up a scalar as text. Numbers and booleans are rendered as strings.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Look up an integer. Numeric strings are accepted.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Look up a boolean. The strings `true`/`false` are accepted.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Look up any value, including maps and lists, as JSON.
    fn get_json(&self, key: &str) -> Option<Value>;

    /// Top-level keys known to this source.
    fn keys(&self) -> Vec<String>;

    /// Whether the key resolves to a value.
    fn contains(&self, key: &str) -> bool {
        self.get_json(key).is_some()
    }
}

/// Source with no values at all, used before the first load.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySource;

impl ConfigSource for EmptySource {
    fn get_string(&self, _key: &str) -> Option<String> {
        None
    }

    fn get_int(&self, _key: &str) -> Option<i64> {
        None
    }

    fn get_bool(&self, _key: &str) -> Option<bool> {
        None
    }

    fn get_json(&self, _key: &str) -> Option<Value> {
        None
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}
