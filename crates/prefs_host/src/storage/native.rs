//! Native platform preference store contract and in-process adapters.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{codec::PrefValue, error::PrefsResult};

/// Host platform preference API, already namespaced and persistent.
///
/// Getters return `default` for missing keys and for keys holding a different type.
pub trait NativePrefsStore: Send + Sync {
    /// Stores an integer under `key`.
    fn set_int(&self, key: &str, value: i32) -> PrefsResult<()>;
    /// Loads an integer, or `default`.
    fn get_int(&self, key: &str, default: i32) -> PrefsResult<i32>;
    /// Stores a float under `key`.
    fn set_float(&self, key: &str, value: f32) -> PrefsResult<()>;
    /// Loads a float, or `default`.
    fn get_float(&self, key: &str, default: f32) -> PrefsResult<f32>;
    /// Stores a string under `key`.
    fn set_string(&self, key: &str, value: &str) -> PrefsResult<()>;
    /// Loads a string, or `default`.
    fn get_string(&self, key: &str, default: &str) -> PrefsResult<String>;
    /// Reports whether `key` holds any value.
    fn has_key(&self, key: &str) -> PrefsResult<bool>;
    /// Removes `key`; absent keys are ignored.
    fn delete_key(&self, key: &str) -> PrefsResult<()>;
    /// Removes every key owned by this store.
    fn delete_all(&self) -> PrefsResult<()>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Native store that keeps nothing, for unsupported targets and baseline tests.
pub struct NoopNativePrefs;

impl NativePrefsStore for NoopNativePrefs {
    fn set_int(&self, _key: &str, _value: i32) -> PrefsResult<()> {
        Ok(())
    }

    fn get_int(&self, _key: &str, default: i32) -> PrefsResult<i32> {
        Ok(default)
    }

    fn set_float(&self, _key: &str, _value: f32) -> PrefsResult<()> {
        Ok(())
    }

    fn get_float(&self, _key: &str, default: f32) -> PrefsResult<f32> {
        Ok(default)
    }

    fn set_string(&self, _key: &str, _value: &str) -> PrefsResult<()> {
        Ok(())
    }

    fn get_string(&self, _key: &str, default: &str) -> PrefsResult<String> {
        Ok(default.to_string())
    }

    fn has_key(&self, _key: &str) -> PrefsResult<bool> {
        Ok(false)
    }

    fn delete_key(&self, _key: &str) -> PrefsResult<()> {
        Ok(())
    }

    fn delete_all(&self) -> PrefsResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory native store with typed slots.
///
/// Clones share the same map.
pub struct MemoryNativePrefs {
    inner: Arc<Mutex<HashMap<String, PrefValue>>>,
}

impl MemoryNativePrefs {
    fn map(&self) -> MutexGuard<'_, HashMap<String, PrefValue>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, key: &str, value: PrefValue) {
        self.map().insert(key.to_string(), value);
    }

    /// Returns the raw typed slot for `key`.
    pub fn value(&self, key: &str) -> Option<PrefValue> {
        self.map().get(key).cloned()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.map().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

impl NativePrefsStore for MemoryNativePrefs {
    fn set_int(&self, key: &str, value: i32) -> PrefsResult<()> {
        self.insert(key, PrefValue::Int(value));
        Ok(())
    }

    fn get_int(&self, key: &str, default: i32) -> PrefsResult<i32> {
        Ok(match self.value(key) {
            Some(PrefValue::Int(value)) => value,
            _ => default,
        })
    }

    fn set_float(&self, key: &str, value: f32) -> PrefsResult<()> {
        self.insert(key, PrefValue::Float(value));
        Ok(())
    }

    fn get_float(&self, key: &str, default: f32) -> PrefsResult<f32> {
        Ok(match self.value(key) {
            Some(PrefValue::Float(value)) => value,
            _ => default,
        })
    }

    fn set_string(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.insert(key, PrefValue::String(value.to_string()));
        Ok(())
    }

    fn get_string(&self, key: &str, default: &str) -> PrefsResult<String> {
        Ok(match self.value(key) {
            Some(PrefValue::String(value)) => value,
            _ => default.to_string(),
        })
    }

    fn has_key(&self, key: &str) -> PrefsResult<bool> {
        Ok(self.map().contains_key(key))
    }

    fn delete_key(&self, key: &str) -> PrefsResult<()> {
        self.map().remove(key);
        Ok(())
    }

    fn delete_all(&self) -> PrefsResult<()> {
        self.map().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_native_prefs_round_trip_and_delete() {
        let store = MemoryNativePrefs::default();
        let store_obj: &dyn NativePrefsStore = &store;

        store_obj.set_int("volume", 7).expect("set int");
        store_obj.set_float("gamma", 1.5).expect("set float");
        store_obj.set_string("name", "ada").expect("set string");

        assert_eq!(store_obj.get_int("volume", 0).expect("get int"), 7);
        assert_eq!(store_obj.get_float("gamma", 0.0).expect("get float"), 1.5);
        assert_eq!(store_obj.get_string("name", "").expect("get string"), "ada");

        store_obj.delete_key("volume").expect("delete");
        assert!(!store_obj.has_key("volume").expect("has key"));
        assert!(store_obj.has_key("gamma").expect("has key"));

        store_obj.delete_all().expect("delete all");
        assert!(store.is_empty());
    }

    #[test]
    fn memory_native_prefs_type_mismatch_returns_default() {
        let store = MemoryNativePrefs::default();
        store.set_string("volume", "loud").expect("set string");
        assert_eq!(store.get_int("volume", 3).expect("get int"), 3);
        assert_eq!(store.get_float("volume", 0.5).expect("get float"), 0.5);
    }

    #[test]
    fn memory_native_prefs_clones_share_state() {
        let store = MemoryNativePrefs::default();
        let clone = store.clone();
        clone.set_int("shared", 1).expect("set");
        assert_eq!(store.value("shared"), Some(PrefValue::Int(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn noop_native_prefs_is_empty_and_successful() {
        let store = NoopNativePrefs;
        let store_obj: &dyn NativePrefsStore = &store;
        store_obj.set_int("k", 1).expect("set");
        assert_eq!(store_obj.get_int("k", 9).expect("get"), 9);
        assert_eq!(store_obj.get_string("k", "d").expect("get"), "d");
        assert!(!store_obj.has_key("k").expect("has key"));
        store_obj.delete_key("k").expect("delete");
        store_obj.delete_all().expect("delete all");
    }
}
