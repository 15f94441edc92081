//! Persistent virtual filesystem contract plus host and in-memory implementations.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    error::{PrefsError, PrefsResult},
    path::normalize_virtual_path,
};

/// Directory-capable filesystem addressed by `/`-separated virtual paths.
pub trait VirtualFs: Send + Sync {
    /// Creates `path` and any missing parents. Existing directories are not an error.
    fn create_dir_all(&self, path: &str) -> PrefsResult<()>;
    /// Replaces the whole contents of the file at `path`.
    fn write_text(&self, path: &str, text: &str) -> PrefsResult<()>;
    /// Reads the file at `path`, or `None` when it does not exist.
    fn read_text(&self, path: &str) -> PrefsResult<Option<String>>;
    /// Reports whether a regular file exists at `path`.
    fn exists(&self, path: &str) -> PrefsResult<bool>;
    /// Deletes the file at `path`; returns `false` when nothing was there.
    fn remove_file(&self, path: &str) -> PrefsResult<bool>;
    /// Names of the regular files directly inside `dir`, empty when `dir` is missing.
    fn list_files(&self, dir: &str) -> PrefsResult<Vec<String>>;
}

fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

#[derive(Debug, Default)]
struct MemoryFsState {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, String>,
    read_only: bool,
    unreadable: bool,
}

#[derive(Debug, Clone, Default)]
/// In-memory virtual filesystem. Clones share the same tree.
///
/// Writes require the parent directory to exist, like a real filesystem, so callers that forget
/// to create their directory fail here too.
pub struct MemoryVirtualFs {
    inner: Arc<Mutex<MemoryFsState>>,
}

impl MemoryVirtualFs {
    fn state(&self) -> MutexGuard<'_, MemoryFsState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every mutating call fail with a permission error.
    pub fn set_read_only(&self, read_only: bool) {
        self.state().read_only = read_only;
    }

    /// Makes every read of an existing file fail with an I/O error.
    pub fn set_unreadable(&self, unreadable: bool) {
        self.state().unreadable = unreadable;
    }

    /// Reports whether the directory at `path` exists.
    pub fn dir_exists(&self, path: &str) -> bool {
        let path = normalize_virtual_path(path);
        path == "/" || self.state().dirs.contains(&path)
    }

    fn check_writable(
        state: &MemoryFsState,
        operation: &'static str,
        path: &str,
    ) -> PrefsResult<()> {
        if state.read_only {
            return Err(PrefsError::io(operation, path, "permission denied"));
        }
        Ok(())
    }
}

impl VirtualFs for MemoryVirtualFs {
    fn create_dir_all(&self, path: &str) -> PrefsResult<()> {
        let path = normalize_virtual_path(path);
        let mut state = self.state();
        Self::check_writable(&state, "create directory", &path)?;
        let mut prefixes = Vec::new();
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);
            if state.files.contains_key(&current) {
                return Err(PrefsError::io("create directory", path.as_str(), "file exists"));
            }
            prefixes.push(current.clone());
        }
        state.dirs.extend(prefixes);
        Ok(())
    }

    fn write_text(&self, path: &str, text: &str) -> PrefsResult<()> {
        let path = normalize_virtual_path(path);
        let mut state = self.state();
        Self::check_writable(&state, "write", &path)?;
        let parent = parent_of(&path);
        if parent != "/" && !state.dirs.contains(&parent) {
            return Err(PrefsError::io("write", path, "parent directory does not exist"));
        }
        if state.dirs.contains(&path) {
            return Err(PrefsError::io("write", path, "is a directory"));
        }
        state.files.insert(path, text.to_string());
        Ok(())
    }

    fn read_text(&self, path: &str) -> PrefsResult<Option<String>> {
        let path = normalize_virtual_path(path);
        let state = self.state();
        match state.files.get(&path) {
            Some(_) if state.unreadable => {
                Err(PrefsError::io("read", path, "input/output error"))
            }
            found => Ok(found.cloned()),
        }
    }

    fn exists(&self, path: &str) -> PrefsResult<bool> {
        Ok(self
            .state()
            .files
            .contains_key(&normalize_virtual_path(path)))
    }

    fn remove_file(&self, path: &str) -> PrefsResult<bool> {
        let path = normalize_virtual_path(path);
        let mut state = self.state();
        Self::check_writable(&state, "delete", &path)?;
        Ok(state.files.remove(&path).is_some())
    }

    fn list_files(&self, dir: &str) -> PrefsResult<Vec<String>> {
        let dir = normalize_virtual_path(dir);
        let state = self.state();
        Ok(state
            .files
            .keys()
            .filter(|path| parent_of(path) == dir)
            .filter_map(|path| path.rsplit('/').next().map(str::to_string))
            .collect())
    }
}

#[derive(Debug, Clone)]
/// Virtual filesystem mapped onto a host directory.
///
/// Virtual paths are normalized before being joined to the root, so `..` segments can never
/// escape it. On Emscripten targets this is also how the mounted browser filesystem is reached.
pub struct StdVirtualFs {
    root: PathBuf,
}

impl StdVirtualFs {
    /// Creates a filesystem rooted at `root`. The root itself is created lazily by writes.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Host directory backing the virtual root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a virtual path to its host path.
    pub fn host_path(&self, path: &str) -> PathBuf {
        let normalized = normalize_virtual_path(path);
        let relative = normalized.trim_start_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }
}

impl VirtualFs for StdVirtualFs {
    fn create_dir_all(&self, path: &str) -> PrefsResult<()> {
        let host = self.host_path(path);
        fs::create_dir_all(&host)
            .map_err(|err| PrefsError::host_io("create directory", &host, &err))
    }

    fn write_text(&self, path: &str, text: &str) -> PrefsResult<()> {
        let host = self.host_path(path);
        fs::write(&host, text).map_err(|err| PrefsError::host_io("write", &host, &err))
    }

    fn read_text(&self, path: &str) -> PrefsResult<Option<String>> {
        let host = self.host_path(path);
        match fs::read(&host) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PrefsError::host_io("read", &host, &err)),
        }
    }

    fn exists(&self, path: &str) -> PrefsResult<bool> {
        Ok(self.host_path(path).is_file())
    }

    fn remove_file(&self, path: &str) -> PrefsResult<bool> {
        let host = self.host_path(path);
        match fs::remove_file(&host) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(PrefsError::host_io("delete", &host, &err)),
        }
    }

    fn list_files(&self, dir: &str) -> PrefsResult<Vec<String>> {
        let host = self.host_path(dir);
        let entries = match fs::read_dir(&host) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(PrefsError::host_io("list", &host, &err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| PrefsError::host_io("list", &host, &err))?;
            let is_file = entry
                .file_type()
                .map_err(|err| PrefsError::host_io("stat", &entry.path(), &err))?
                .is_file();
            if !is_file {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
