//! Native preference store backed by a single JSON map file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use prefs_host::{
    decode_float, decode_int, encode_float, encode_int, NativePrefsStore, PrefsError, PrefsResult,
};

type PrefMap = BTreeMap<String, String>;

/// File name of the map inside the store root.
pub const PREFS_FILE_NAME: &str = "prefs.json";

fn load_pref_map(path: &Path) -> PrefsResult<PrefMap> {
    if !path.exists() {
        return Ok(PrefMap::new());
    }
    let raw = fs::read_to_string(path).map_err(|err| PrefsError::host_io("read", path, &err))?;
    if raw.trim().is_empty() {
        return Ok(PrefMap::new());
    }
    serde_json::from_str(&raw).map_err(|err| {
        PrefsError::Store(format!("failed to parse prefs map {}: {err}", path.display()))
    })
}

fn save_pref_map(path: &Path, map: &PrefMap) -> PrefsResult<()> {
    let serialized = serde_json::to_string(map)
        .map_err(|err| PrefsError::Store(format!("failed to serialize prefs map: {err}")))?;
    fs::write(path, serialized).map_err(|err| PrefsError::host_io("write", path, &err))
}

fn validate_key(key: &str) -> PrefsResult<()> {
    if key.is_empty() {
        Err(PrefsError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Scoped preference store keeping every entry as canonical text in `<root>/prefs.json`.
///
/// Each call reads the map from disk, so edits by other store instances are visible. Reads and
/// read-modify-write cycles are serialized within the process; clones share the same lock.
pub struct JsonMapPrefs {
    file: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonMapPrefs {
    /// Creates a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Io`] when the directory cannot be created.
    pub fn from_root(root: impl AsRef<Path>) -> PrefsResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| PrefsError::host_io("create directory", root, &err))?;
        Ok(Self {
            file: root.join(PREFS_FILE_NAME),
            lock: Arc::new(Mutex::new(())),
        })
    }

    /// Path of the backing map file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn load(&self, key: &str) -> PrefsResult<Option<String>> {
        validate_key(key)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let map = load_pref_map(&self.file)?;
        Ok(map.get(key).cloned())
    }

    fn update(&self, mutate: impl FnOnce(&mut PrefMap) -> bool) -> PrefsResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = load_pref_map(&self.file)?;
        if mutate(&mut map) {
            save_pref_map(&self.file, &map)?;
        }
        Ok(())
    }

    fn save(&self, key: &str, raw: String) -> PrefsResult<()> {
        validate_key(key)?;
        self.update(|map| {
            map.insert(key.to_string(), raw);
            true
        })
    }
}

impl NativePrefsStore for JsonMapPrefs {
    fn set_int(&self, key: &str, value: i32) -> PrefsResult<()> {
        self.save(key, encode_int(value))
    }

    fn get_int(&self, key: &str, default: i32) -> PrefsResult<i32> {
        Ok(self.load(key)?.and_then(|raw| decode_int(&raw)).unwrap_or(default))
    }

    fn set_float(&self, key: &str, value: f32) -> PrefsResult<()> {
        self.save(key, encode_float(value))
    }

    fn get_float(&self, key: &str, default: f32) -> PrefsResult<f32> {
        Ok(self
            .load(key)?
            .and_then(|raw| decode_float(&raw))
            .unwrap_or(default))
    }

    fn set_string(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.save(key, value.to_string())
    }

    fn get_string(&self, key: &str, default: &str) -> PrefsResult<String> {
        Ok(self.load(key)?.unwrap_or_else(|| default.to_string()))
    }

    fn has_key(&self, key: &str) -> PrefsResult<bool> {
        Ok(self.load(key)?.is_some())
    }

    fn delete_key(&self, key: &str) -> PrefsResult<()> {
        validate_key(key)?;
        self.update(|map| map.remove(key).is_some())
    }

    fn delete_all(&self) -> PrefsResult<()> {
        self.update(|map| {
            let had_entries = !map.is_empty();
            map.clear();
            had_entries
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{load_pref_map, save_pref_map, JsonMapPrefs, PrefMap, PREFS_FILE_NAME};
    use pretty_assertions::assert_eq;
    use prefs_host::{NativePrefsStore, PrefsError};
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir_path() -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path =
            std::env::temp_dir().join(format!("prefs_desktop_json_{}_{}", process::id(), now));
        fs::create_dir_all(&path).expect("create temp dir");
        path
    }

    #[test]
    fn pref_map_round_trips() {
        let root = temp_dir_path();
        let path = root.join(PREFS_FILE_NAME);

        let initial = load_pref_map(&path).expect("load should succeed when file is missing");
        assert!(initial.is_empty());

        let mut map = PrefMap::new();
        map.insert("music.volume".to_string(), "0.5".to_string());
        save_pref_map(&path, &map).expect("save map");
        let loaded = load_pref_map(&path).expect("reload map");
        assert_eq!(loaded, map);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn blank_map_file_is_empty() {
        let root = temp_dir_path();
        fs::write(root.join(PREFS_FILE_NAME), "  \n").expect("write blank map");
        let store = JsonMapPrefs::from_root(&root).expect("init store");
        assert!(!store.has_key("anything").expect("has key"));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn typed_values_are_stored_as_text() {
        let root = temp_dir_path();
        let store = JsonMapPrefs::from_root(&root).expect("init store");

        store.set_int("level", 12).expect("set int");
        store.set_float("volume", 0.1).expect("set float");
        store.set_string("name", "Ada").expect("set string");

        let raw = fs::read_to_string(store.file()).expect("read map");
        assert_eq!(raw, r#"{"level":"12","name":"Ada","volume":"0.1"}"#);
        assert_eq!(store.get_int("level", 0).expect("get int"), 12);
        assert_eq!(store.get_float("volume", 0.0).expect("get float"), 0.1);
        assert_eq!(store.get_string("name", "").expect("get string"), "Ada");
        assert_eq!(store.get_int("name", -1).expect("mismatched type"), -1);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn delete_key_and_delete_all() {
        let root = temp_dir_path();
        let store = JsonMapPrefs::from_root(&root).expect("init store");
        store.set_int("a", 1).expect("set a");
        store.set_int("b", 2).expect("set b");

        store.delete_key("missing").expect("delete missing");
        store.delete_key("a").expect("delete a");
        assert!(!store.has_key("a").expect("has a"));
        assert!(store.has_key("b").expect("has b"));

        store.delete_all().expect("delete all");
        assert!(!store.has_key("b").expect("has b"));
        store.set_int("b", 3).expect("set after delete all");
        assert_eq!(store.get_int("b", 0).expect("get b"), 3);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn empty_key_is_rejected_for_all_operations() {
        let root = temp_dir_path();
        let store = JsonMapPrefs::from_root(&root).expect("init store");

        let expected = PrefsError::InvalidKey(String::new());
        assert_eq!(store.get_int("", 0).expect_err("get"), expected);
        assert_eq!(store.set_string("", "x").expect_err("set"), expected);
        assert_eq!(store.delete_key("").expect_err("delete"), expected);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_map_is_a_store_error() {
        let root = temp_dir_path();
        let prefs_path = root.join(PREFS_FILE_NAME);
        fs::write(&prefs_path, "{\"bad\":").expect("write malformed prefs map");
        let store = JsonMapPrefs::from_root(&root).expect("init store");

        let err = store.get_int("level", 0).expect_err("malformed map should fail");
        let message = match err {
            PrefsError::Store(message) => message,
            other => panic!("unexpected error: {other:?}"),
        };
        assert!(
            message.starts_with(&format!(
                "failed to parse prefs map {}:",
                prefs_path.display()
            )),
            "unexpected error: {message}"
        );

        let _ = fs::remove_dir_all(root);
    }
}
