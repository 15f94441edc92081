//! Backend selection for [`PreferenceStore`](crate::PreferenceStore).

use serde::{Deserialize, Serialize};

use crate::storage::{file_backend::VirtualFileBackend, native::NativePrefsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Concrete storage strategy behind a preference store.
pub enum BackendKind {
    /// Host platform preference API.
    Native,
    /// One text file per key on a persistent virtual filesystem.
    VirtualFile,
}

impl BackendKind {
    /// Stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::VirtualFile => "virtual-file",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Configured backend choice.
pub enum BackendSelection {
    /// Probe the target with [`detect_backend_kind`].
    #[default]
    Auto,
    /// Always use the native store.
    Native,
    /// Always use the virtual file store.
    VirtualFile,
}

impl BackendSelection {
    /// Resolves `Auto` against the current target.
    pub fn resolve(self) -> BackendKind {
        match self {
            Self::Auto => detect_backend_kind(),
            Self::Native => BackendKind::Native,
            Self::VirtualFile => BackendKind::VirtualFile,
        }
    }
}

/// Browser-hosted builds persist through the virtual filesystem; everything else is native.
pub const fn detect_backend_kind() -> BackendKind {
    if cfg!(target_arch = "wasm32") {
        BackendKind::VirtualFile
    } else {
        BackendKind::Native
    }
}

/// Storage strategy injected into a [`PreferenceStore`](crate::PreferenceStore).
pub enum StorageBackend {
    /// Delegates verbatim to a host preference store.
    Native(Box<dyn NativePrefsStore>),
    /// Persists one file per key.
    VirtualFile(VirtualFileBackend),
}

impl StorageBackend {
    /// Wraps a native store.
    pub fn native(store: impl NativePrefsStore + 'static) -> Self {
        Self::Native(Box::new(store))
    }

    /// Which strategy this is.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Native(_) => BackendKind::Native,
            Self::VirtualFile(_) => BackendKind::VirtualFile,
        }
    }
}

impl From<VirtualFileBackend> for StorageBackend {
    fn from(backend: VirtualFileBackend) -> Self {
        Self::VirtualFile(backend)
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native(_) => f.write_str("StorageBackend::Native"),
            Self::VirtualFile(backend) => f
                .debug_tuple("StorageBackend::VirtualFile")
                .field(backend)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_selection_ignores_target() {
        assert_eq!(BackendSelection::Native.resolve(), BackendKind::Native);
        assert_eq!(BackendSelection::VirtualFile.resolve(), BackendKind::VirtualFile);
        assert_eq!(BackendSelection::Auto.resolve(), detect_backend_kind());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn auto_detects_native_off_browser() {
        assert_eq!(detect_backend_kind(), BackendKind::Native);
    }

    #[test]
    fn kind_tokens_are_stable() {
        assert_eq!(BackendKind::Native.as_str(), "native");
        assert_eq!(BackendKind::VirtualFile.as_str(), "virtual-file");
    }
}
