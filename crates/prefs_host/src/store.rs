//! Typed preference accessor over an injected [`StorageBackend`].

use crate::{
    backend::{BackendKind, StorageBackend},
    codec::{decode_float, decode_int, decode_string, encode_float, encode_int, encode_string},
    error::PrefsResult,
    namespace::Namespace,
    storage::{
        file_backend::VirtualFileBackend, native::NativePrefsStore, sync::DurableSync,
        virtual_fs::VirtualFs,
    },
};

/// Typed get/set/has/delete API over one preference namespace.
///
/// Missing keys and stored text that does not decode as the requested type both yield the
/// caller's default. Backend failures are returned as errors and never replaced by defaults.
///
/// # Example
///
/// ```rust
/// use prefs_host::{MemoryVirtualFs, Namespace, NoopDurableSync, PreferenceStore};
///
/// let store = PreferenceStore::virtual_file(
///     Namespace::new("My Co!", "Game/2"),
///     MemoryVirtualFs::default(),
///     NoopDurableSync,
/// );
/// store.set_float("music.volume", 0.8).expect("write");
/// assert_eq!(store.get_float("music.volume").expect("read"), 0.8);
/// assert_eq!(store.get_int_or("missing", 3).expect("read"), 3);
/// ```
#[derive(Debug)]
pub struct PreferenceStore {
    backend: StorageBackend,
}

impl PreferenceStore {
    /// Creates a store over an already chosen backend.
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }

    /// Creates a store that delegates to a host preference API.
    pub fn native(store: impl NativePrefsStore + 'static) -> Self {
        Self::new(StorageBackend::native(store))
    }

    /// Creates a store that writes one file per key under `namespace`.
    pub fn virtual_file(
        namespace: Namespace,
        fs: impl VirtualFs + 'static,
        sync: impl DurableSync + 'static,
    ) -> Self {
        Self::new(VirtualFileBackend::new(namespace, fs, sync).into())
    }

    /// Strategy this store dispatches to.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Stores an integer.
    pub fn set_int(&self, key: &str, value: i32) -> PrefsResult<()> {
        match &self.backend {
            StorageBackend::Native(store) => store.set_int(key, value),
            StorageBackend::VirtualFile(files) => files.write(key, &encode_int(value)),
        }
    }

    /// Loads an integer, defaulting to `0`.
    pub fn get_int(&self, key: &str) -> PrefsResult<i32> {
        self.get_int_or(key, 0)
    }

    /// Loads an integer, or `default` when absent or unparseable.
    pub fn get_int_or(&self, key: &str, default: i32) -> PrefsResult<i32> {
        match &self.backend {
            StorageBackend::Native(store) => store.get_int(key, default),
            StorageBackend::VirtualFile(files) => files.read_or(key, default, decode_int),
        }
    }

    /// Stores a float.
    pub fn set_float(&self, key: &str, value: f32) -> PrefsResult<()> {
        match &self.backend {
            StorageBackend::Native(store) => store.set_float(key, value),
            StorageBackend::VirtualFile(files) => files.write(key, &encode_float(value)),
        }
    }

    /// Loads a float, defaulting to `0.0`.
    pub fn get_float(&self, key: &str) -> PrefsResult<f32> {
        self.get_float_or(key, 0.0)
    }

    /// Loads a float, or `default` when absent or unparseable.
    pub fn get_float_or(&self, key: &str, default: f32) -> PrefsResult<f32> {
        match &self.backend {
            StorageBackend::Native(store) => store.get_float(key, default),
            StorageBackend::VirtualFile(files) => files.read_or(key, default, decode_float),
        }
    }

    /// Stores a string.
    pub fn set_string(&self, key: &str, value: &str) -> PrefsResult<()> {
        match &self.backend {
            StorageBackend::Native(store) => store.set_string(key, value),
            StorageBackend::VirtualFile(files) => files.write(key, &encode_string(value)),
        }
    }

    /// Loads a string, defaulting to `""`.
    pub fn get_string(&self, key: &str) -> PrefsResult<String> {
        self.get_string_or(key, "")
    }

    /// Loads a string, or `default` when absent.
    pub fn get_string_or(&self, key: &str, default: &str) -> PrefsResult<String> {
        match &self.backend {
            StorageBackend::Native(store) => store.get_string(key, default),
            StorageBackend::VirtualFile(files) => {
                files.read_or(key, default.to_string(), decode_string)
            }
        }
    }

    /// Whether an entry exists for `key`.
    pub fn has_key(&self, key: &str) -> PrefsResult<bool> {
        match &self.backend {
            StorageBackend::Native(store) => store.has_key(key),
            StorageBackend::VirtualFile(files) => files.contains(key),
        }
    }

    /// Removes the entry for `key`. Absent keys are not an error.
    pub fn delete_key(&self, key: &str) -> PrefsResult<()> {
        match &self.backend {
            StorageBackend::Native(store) => store.delete_key(key),
            StorageBackend::VirtualFile(files) => files.remove(key),
        }
    }

    /// Removes every entry in the namespace.
    pub fn delete_all(&self) -> PrefsResult<()> {
        match &self.backend {
            StorageBackend::Native(store) => store.delete_all(),
            StorageBackend::VirtualFile(files) => files.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{
        native::MemoryNativePrefs, sync::RecordingDurableSync, virtual_fs::MemoryVirtualFs,
    };

    fn stores() -> Vec<PreferenceStore> {
        vec![
            PreferenceStore::native(MemoryNativePrefs::default()),
            PreferenceStore::virtual_file(
                Namespace::new("Co", "App"),
                MemoryVirtualFs::default(),
                RecordingDurableSync::default(),
            ),
        ]
    }

    #[test]
    fn typed_values_round_trip_on_both_backends() {
        for store in stores() {
            let kind = store.backend_kind();
            store.set_int("i", -42).expect("set int");
            store.set_float("f", 0.1).expect("set float");
            store.set_string("s", "hello, world").expect("set string");

            assert_eq!(store.get_int_or("i", 1).expect("get int"), -42, "{kind:?}");
            assert_eq!(store.get_float_or("f", 1.0).expect("get float"), 0.1, "{kind:?}");
            assert_eq!(
                store.get_string_or("s", "d").expect("get string"),
                "hello, world",
                "{kind:?}"
            );
        }
    }

    #[test]
    fn never_set_keys_return_defaults() {
        for store in stores() {
            assert_eq!(store.get_int("nope").expect("get"), 0);
            assert_eq!(store.get_int_or("nope", 17).expect("get"), 17);
            assert_eq!(store.get_float("nope").expect("get"), 0.0);
            assert_eq!(store.get_float_or("nope", 2.5).expect("get"), 2.5);
            assert_eq!(store.get_string("nope").expect("get"), "");
            assert_eq!(store.get_string_or("nope", "dflt").expect("get"), "dflt");
        }
    }

    #[test]
    fn overwrite_replaces_the_whole_value() {
        for store in stores() {
            store.set_string("k", "a long first value").expect("set");
            store.set_string("k", "b").expect("overwrite");
            assert_eq!(store.get_string("k").expect("get"), "b");
        }
    }

    #[test]
    fn has_key_tracks_set_and_delete() {
        for store in stores() {
            assert!(!store.has_key("k").expect("has"));
            store.set_int("k", 1).expect("set");
            assert!(store.has_key("k").expect("has"));
            store.delete_key("k").expect("delete");
            assert!(!store.has_key("k").expect("has"));
        }
    }

    #[test]
    fn deleting_absent_key_leaves_others() {
        for store in stores() {
            store.set_int("keep", 9).expect("set");
            store.delete_key("absent").expect("delete absent");
            assert_eq!(store.get_int("keep").expect("get"), 9);
        }
    }

    #[test]
    fn delete_all_clears_and_store_stays_usable() {
        for store in stores() {
            store.set_int("a", 1).expect("set");
            store.set_float("b", 2.0).expect("set");
            store.set_string("c", "3").expect("set");
            store.delete_all().expect("delete all");
            for key in ["a", "b", "c"] {
                assert!(!store.has_key(key).expect("has"), "key={key}");
            }
            store.set_int("a", 4).expect("set after clear");
            assert_eq!(store.get_int("a").expect("get"), 4);
        }
    }

    #[test]
    fn string_written_value_read_as_number_returns_default() {
        let store = PreferenceStore::virtual_file(
            Namespace::new("Co", "App"),
            MemoryVirtualFs::default(),
            RecordingDurableSync::default(),
        );
        store.set_string("n", "twelve").expect("set");
        assert_eq!(store.get_int_or("n", -1).expect("get"), -1);
        assert_eq!(store.get_float_or("n", -1.0).expect("get"), -1.0);
        store.set_int("n", 12).expect("set");
        assert_eq!(store.get_float("n").expect("int text parses as float"), 12.0);
    }

    #[test]
    fn sync_follows_every_write() {
        let sync = RecordingDurableSync::default();
        let store = PreferenceStore::virtual_file(
            Namespace::new("Co", "App"),
            MemoryVirtualFs::default(),
            sync.clone(),
        );
        store.set_int("a", 1).expect("set");
        store.set_float("b", 1.0).expect("set");
        store.set_string("c", "x").expect("set");
        assert_eq!(sync.calls(), 3);
        store.get_int("a").expect("get");
        store.has_key("a").expect("has");
        assert_eq!(sync.calls(), 3);
    }

    #[test]
    fn backend_kind_reports_strategy() {
        let kinds: Vec<_> = stores().iter().map(PreferenceStore::backend_kind).collect();
        assert_eq!(kinds, vec![BackendKind::Native, BackendKind::VirtualFile]);
    }
}
