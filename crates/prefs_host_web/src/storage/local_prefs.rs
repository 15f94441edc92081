//! `localStorage`-backed native preference store.
//!
//! Values are kept as their canonical text, so a browser build using the native strategy shares
//! the exact encoding of the file-backed strategy. Every key is prefixed with the namespace's
//! `<organization>/<application>/` so several applications on one origin do not collide and
//! `delete_all` only touches this application's entries.

use prefs_host::{
    decode_float, decode_int, encode_float, encode_int, Namespace, NativePrefsStore, PrefsError,
    PrefsResult,
};

use crate::bridge;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebLocalPrefs {
    prefix: String,
}

impl WebLocalPrefs {
    /// Creates a store scoped to `namespace`.
    pub fn new(namespace: &Namespace) -> Self {
        Self {
            prefix: namespace.key_prefix(),
        }
    }

    /// Prefix prepended to every key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full `localStorage` key for a preference key.
    pub fn storage_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    fn load(&self, key: &str) -> PrefsResult<Option<String>> {
        bridge::local_storage_get(&self.storage_key(key)).map_err(PrefsError::Store)
    }

    fn save(&self, key: &str, raw: &str) -> PrefsResult<()> {
        bridge::local_storage_set(&self.storage_key(key), raw).map_err(PrefsError::Store)
    }
}

impl NativePrefsStore for WebLocalPrefs {
    fn set_int(&self, key: &str, value: i32) -> PrefsResult<()> {
        self.save(key, &encode_int(value))
    }

    fn get_int(&self, key: &str, default: i32) -> PrefsResult<i32> {
        Ok(self.load(key)?.and_then(|raw| decode_int(&raw)).unwrap_or(default))
    }

    fn set_float(&self, key: &str, value: f32) -> PrefsResult<()> {
        self.save(key, &encode_float(value))
    }

    fn get_float(&self, key: &str, default: f32) -> PrefsResult<f32> {
        Ok(self
            .load(key)?
            .and_then(|raw| decode_float(&raw))
            .unwrap_or(default))
    }

    fn set_string(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.save(key, value)
    }

    fn get_string(&self, key: &str, default: &str) -> PrefsResult<String> {
        Ok(self.load(key)?.unwrap_or_else(|| default.to_string()))
    }

    fn has_key(&self, key: &str) -> PrefsResult<bool> {
        Ok(self.load(key)?.is_some())
    }

    fn delete_key(&self, key: &str) -> PrefsResult<()> {
        bridge::local_storage_remove(&self.storage_key(key)).map_err(PrefsError::Store)
    }

    fn delete_all(&self) -> PrefsResult<()> {
        let owned: Vec<String> = bridge::local_storage_keys()
            .map_err(PrefsError::Store)?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect();
        for key in owned {
            bridge::local_storage_remove(&key).map_err(PrefsError::Store)?;
        }
        Ok(())
    }
}
