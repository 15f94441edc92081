//! One-file-per-key preference backend over a [`VirtualFs`].

use crate::{
    error::{PrefsError, PrefsResult},
    namespace::Namespace,
    storage::{sync::DurableSync, virtual_fs::VirtualFs},
};

/// Rejects keys that cannot name a single file directly inside the namespace directory.
///
/// `delete_all` rebuilds paths from listed file names, so only keys that survive that round trip
/// are accepted.
pub fn validate_file_key(key: &str) -> PrefsResult<()> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        Err(PrefsError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

/// Stores each entry as the text file `<namespace>/<key>`.
///
/// Every successful mutation is followed by a call to the injected [`DurableSync`].
pub struct VirtualFileBackend {
    namespace: Namespace,
    fs: Box<dyn VirtualFs>,
    sync: Box<dyn DurableSync>,
}

impl std::fmt::Debug for VirtualFileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualFileBackend")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl VirtualFileBackend {
    /// Creates a backend writing into `namespace` on `fs`.
    pub fn new(
        namespace: Namespace,
        fs: impl VirtualFs + 'static,
        sync: impl DurableSync + 'static,
    ) -> Self {
        Self::from_boxed(namespace, Box::new(fs), Box::new(sync))
    }

    /// Creates a backend from already boxed collaborators.
    pub fn from_boxed(
        namespace: Namespace,
        fs: Box<dyn VirtualFs>,
        sync: Box<dyn DurableSync>,
    ) -> Self {
        Self {
            namespace,
            fs,
            sync,
        }
    }

    /// Namespace this backend owns.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn path_for(&self, key: &str) -> PrefsResult<String> {
        validate_file_key(key)?;
        Ok(self.namespace.file_path(key))
    }

    /// Writes the encoded text for `key` and flushes.
    pub fn write(&self, key: &str, text: &str) -> PrefsResult<()> {
        let path = self.path_for(key)?;
        self.fs.create_dir_all(&self.namespace.dir_path())?;
        self.fs.write_text(&path, text)?;
        self.sync.sync();
        Ok(())
    }

    /// Reads the stored text for `key`, if any.
    pub fn read(&self, key: &str) -> PrefsResult<Option<String>> {
        let path = self.path_for(key)?;
        if !self.fs.exists(&path)? {
            return Ok(None);
        }
        self.fs.read_text(&path)
    }

    /// Reads `key` and decodes it, falling back to `default` when absent or malformed.
    pub fn read_or<T>(
        &self,
        key: &str,
        default: T,
        decode: impl FnOnce(&str) -> Option<T>,
    ) -> PrefsResult<T> {
        Ok(self
            .read(key)?
            .and_then(|raw| decode(&raw))
            .unwrap_or(default))
    }

    /// Whether a file exists for `key`.
    pub fn contains(&self, key: &str) -> PrefsResult<bool> {
        let path = self.path_for(key)?;
        self.fs.exists(&path)
    }

    /// Deletes the file for `key`; absent keys are ignored.
    pub fn remove(&self, key: &str) -> PrefsResult<()> {
        let path = self.path_for(key)?;
        if self.fs.remove_file(&path)? {
            self.sync.sync();
        }
        Ok(())
    }

    /// Deletes every file directly inside the namespace directory, leaving the directory.
    ///
    /// Stops at the first failed removal; files already removed are still flushed.
    pub fn clear(&self) -> PrefsResult<()> {
        let mut removed = false;
        let mut outcome = Ok(());
        for name in self.fs.list_files(&self.namespace.dir_path())? {
            match self.fs.remove_file(&self.namespace.file_path(&name)) {
                Ok(hit) => removed |= hit,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }
        if removed {
            self.sync.sync();
        }
        outcome
    }

    /// Names of the entries currently stored.
    pub fn keys(&self) -> PrefsResult<Vec<String>> {
        self.fs.list_files(&self.namespace.dir_path())
    }
}
