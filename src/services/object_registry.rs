//! Typed object registry
//!
//! Shares runtime objects (clients, pools, connections) between
//! initialization steps. Values are stored as `Arc<T>` and retrieved with
//! their concrete type, so a wrong type is a reported error rather than a
//! failed cast at the call site.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::RegistryError;

type Entry = Arc<dyn Any + Send + Sync>;

/// Key bound to the type stored under it
///
/// ```
/// use microkit::services::ObjectKey;
///
/// const DB_POOL: ObjectKey<String> = ObjectKey::new("db_pool");
/// assert_eq!(DB_POOL.name(), "db_pool");
/// ```
pub struct ObjectKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ObjectKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ObjectKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ObjectKey<T> {}

impl<T> fmt::Debug for ObjectKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectKey")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .finish()
    }
}

/// String-keyed registry guarded by a single mutex
#[derive(Default)]
pub struct ObjectRegistry {
    objects: Mutex<HashMap<String, Entry>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the object stored under `key`.
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.set_arc(key, Arc::new(value));
    }

    /// Insert or replace with an already shared value.
    pub fn set_arc<T>(&self, key: impl Into<String>, value: Arc<T>)
    where
        T: Any + Send + Sync,
    {
        self.lock().insert(key.into(), value);
    }

    /// Fetch the object stored under `key` as `T`.
    pub fn get<T>(&self, key: &str) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        let entry = self
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))?;

        entry
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    pub fn set_typed<T>(&self, key: &ObjectKey<T>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.set(key.name(), value);
    }

    pub fn get_typed<T>(&self, key: &ObjectKey<T>) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        self.get(key.name())
    }

    /// Remove and return whether something was stored.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are immutable Arcs, so a panic while holding the lock cannot
    // leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        f.debug_struct("ObjectRegistry").field("keys", &keys).finish()
    }
}
