use prefs_host::{
    BackendKind, DurableSync, MemoryVirtualFs, Namespace, NativePrefsStore, NoopDurableSync,
    NoopNativePrefs, PreferenceStore, PrefsConfig, PrefsResult, StorageBackend, VirtualFileBackend,
    VirtualFs,
};

use crate::{EmscriptenFs, IdbfsSync, WebLocalPrefs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `prefs_host_web` adapters.
pub enum HostStrategy {
    /// Browser `localStorage`, Emscripten FS and IDBFS sync.
    Browser,
    /// In-process stand-ins for builds without a browser host (tests, tooling, `headless-host`).
    Headless,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    if cfg!(all(target_arch = "wasm32", not(feature = "headless-host"))) {
        HostStrategy::Browser
    } else {
        HostStrategy::Headless
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Headless => "headless",
    }
}

/// Adapter enum that erases the concrete native store behind [`NativePrefsStore`].
#[derive(Debug, Clone)]
pub enum NativePrefsAdapter {
    /// `localStorage`-backed store.
    Browser(WebLocalPrefs),
    /// Store that keeps nothing.
    Headless(NoopNativePrefs),
}

impl NativePrefsStore for NativePrefsAdapter {
    fn set_int(&self, key: &str, value: i32) -> PrefsResult<()> {
        match self {
            Self::Browser(store) => store.set_int(key, value),
            Self::Headless(store) => store.set_int(key, value),
        }
    }

    fn get_int(&self, key: &str, default: i32) -> PrefsResult<i32> {
        match self {
            Self::Browser(store) => store.get_int(key, default),
            Self::Headless(store) => store.get_int(key, default),
        }
    }

    fn set_float(&self, key: &str, value: f32) -> PrefsResult<()> {
        match self {
            Self::Browser(store) => store.set_float(key, value),
            Self::Headless(store) => store.set_float(key, value),
        }
    }

    fn get_float(&self, key: &str, default: f32) -> PrefsResult<f32> {
        match self {
            Self::Browser(store) => store.get_float(key, default),
            Self::Headless(store) => store.get_float(key, default),
        }
    }

    fn set_string(&self, key: &str, value: &str) -> PrefsResult<()> {
        match self {
            Self::Browser(store) => store.set_string(key, value),
            Self::Headless(store) => store.set_string(key, value),
        }
    }

    fn get_string(&self, key: &str, default: &str) -> PrefsResult<String> {
        match self {
            Self::Browser(store) => store.get_string(key, default),
            Self::Headless(store) => store.get_string(key, default),
        }
    }

    fn has_key(&self, key: &str) -> PrefsResult<bool> {
        match self {
            Self::Browser(store) => store.has_key(key),
            Self::Headless(store) => store.has_key(key),
        }
    }

    fn delete_key(&self, key: &str) -> PrefsResult<()> {
        match self {
            Self::Browser(store) => store.delete_key(key),
            Self::Headless(store) => store.delete_key(key),
        }
    }

    fn delete_all(&self) -> PrefsResult<()> {
        match self {
            Self::Browser(store) => store.delete_all(),
            Self::Headless(store) => store.delete_all(),
        }
    }
}

/// Adapter enum that erases the concrete filesystem behind [`VirtualFs`].
#[derive(Debug, Clone)]
pub enum VirtualFsAdapter {
    /// Emscripten runtime filesystem.
    Browser(EmscriptenFs),
    /// Non-durable in-memory filesystem.
    Headless(MemoryVirtualFs),
}

impl VirtualFs for VirtualFsAdapter {
    fn create_dir_all(&self, path: &str) -> PrefsResult<()> {
        match self {
            Self::Browser(fs) => fs.create_dir_all(path),
            Self::Headless(fs) => fs.create_dir_all(path),
        }
    }

    fn write_text(&self, path: &str, text: &str) -> PrefsResult<()> {
        match self {
            Self::Browser(fs) => fs.write_text(path, text),
            Self::Headless(fs) => fs.write_text(path, text),
        }
    }

    fn read_text(&self, path: &str) -> PrefsResult<Option<String>> {
        match self {
            Self::Browser(fs) => fs.read_text(path),
            Self::Headless(fs) => fs.read_text(path),
        }
    }

    fn exists(&self, path: &str) -> PrefsResult<bool> {
        match self {
            Self::Browser(fs) => fs.exists(path),
            Self::Headless(fs) => fs.exists(path),
        }
    }

    fn remove_file(&self, path: &str) -> PrefsResult<bool> {
        match self {
            Self::Browser(fs) => fs.remove_file(path),
            Self::Headless(fs) => fs.remove_file(path),
        }
    }

    fn list_files(&self, dir: &str) -> PrefsResult<Vec<String>> {
        match self {
            Self::Browser(fs) => fs.list_files(dir),
            Self::Headless(fs) => fs.list_files(dir),
        }
    }
}

/// Adapter enum that erases the concrete sync primitive behind [`DurableSync`].
#[derive(Debug, Clone, Copy)]
pub enum DurableSyncAdapter {
    /// `FS.syncfs` flush to IndexedDB.
    Browser(IdbfsSync),
    /// Nothing to flush.
    Headless(NoopDurableSync),
}

impl DurableSync for DurableSyncAdapter {
    fn sync(&self) -> bool {
        match self {
            Self::Browser(sync) => sync.sync(),
            Self::Headless(sync) => sync.sync(),
        }
    }
}

/// Builds the native store adapter for the selected host strategy.
pub fn native_prefs_store(namespace: &Namespace) -> NativePrefsAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => NativePrefsAdapter::Browser(WebLocalPrefs::new(namespace)),
        HostStrategy::Headless => NativePrefsAdapter::Headless(NoopNativePrefs),
    }
}

/// Builds the virtual filesystem adapter for the selected host strategy.
pub fn virtual_fs() -> VirtualFsAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => VirtualFsAdapter::Browser(EmscriptenFs),
        HostStrategy::Headless => VirtualFsAdapter::Headless(MemoryVirtualFs::default()),
    }
}

/// Builds the durable sync adapter for the selected host strategy.
pub fn durable_sync() -> DurableSyncAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DurableSyncAdapter::Browser(IdbfsSync),
        HostStrategy::Headless => DurableSyncAdapter::Headless(NoopDurableSync),
    }
}

/// Builds a [`PreferenceStore`] for `config` using this crate's host adapters.
///
/// The backend is resolved once here; `auto` picks the virtual-file strategy on wasm targets.
pub fn build_preference_store(config: &PrefsConfig) -> PreferenceStore {
    let namespace = config.namespace();
    let kind = config.resolved_backend();
    let strategy = selected_host_strategy();
    log::debug!(
        "building preference store: backend={} host={} namespace={}",
        kind.as_str(),
        host_strategy_name(),
        namespace.dir_path()
    );
    if strategy == HostStrategy::Headless {
        log::warn!("no browser host available; preferences will not persist");
    }

    let backend = match kind {
        BackendKind::Native => StorageBackend::native(native_prefs_store(&namespace)),
        BackendKind::VirtualFile => {
            VirtualFileBackend::new(namespace, virtual_fs(), durable_sync()).into()
        }
    };
    PreferenceStore::new(backend)
}

#[cfg(test)]
mod tests {
    use prefs_host::{detect_backend_kind, BackendSelection};

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_builds_select_headless_adapters() {
        assert_eq!(selected_host_strategy(), HostStrategy::Headless);
        assert_eq!(host_strategy_name(), "headless");
        assert!(matches!(
            native_prefs_store(&Namespace::new("Co", "App")),
            NativePrefsAdapter::Headless(_)
        ));
        assert!(matches!(virtual_fs(), VirtualFsAdapter::Headless(_)));
        assert!(matches!(durable_sync(), DurableSyncAdapter::Headless(_)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn headless_virtual_file_store_round_trips_in_memory() {
        let config = PrefsConfig::new("Co", "App").with_backend(BackendSelection::VirtualFile);
        let store = build_preference_store(&config);
        assert_eq!(store.backend_kind(), BackendKind::VirtualFile);

        store.set_float("gamma", 2.2).expect("set");
        assert_eq!(store.get_float("gamma").expect("get"), 2.2);
        store.delete_all().expect("delete all");
        assert!(!store.has_key("gamma").expect("has key"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn auto_backend_is_native_off_browser() {
        let store = build_preference_store(&PrefsConfig::new("Co", "App"));
        assert_eq!(store.backend_kind(), BackendKind::Native);
        store.set_int("volume", 3).expect("set");
        assert_eq!(store.get_int_or("volume", 1).expect("get"), 1);
    }

    #[cfg(not(feature = "headless-host"))]
    #[test]
    fn auto_virtual_file_backend_coincides_with_browser_adapters() {
        assert_eq!(
            detect_backend_kind() == BackendKind::VirtualFile,
            selected_host_strategy() == HostStrategy::Browser
        );
    }
}
