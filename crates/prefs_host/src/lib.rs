//! Typed preference persistence with native and virtual-file backing strategies.
//!
//! This crate is the host-independent core. It owns the [`PreferenceStore`] typed API, the text
//! codec used for file-backed entries, namespace derivation from application identity, and the
//! collaborator contracts ([`NativePrefsStore`], [`VirtualFs`], [`DurableSync`]) that concrete
//! browser adapters in `prefs_host_web` and desktop adapters in `prefs_host_desktop` implement.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod namespace;
pub mod path;
pub mod storage;
pub mod store;

pub use backend::{detect_backend_kind, BackendKind, BackendSelection, StorageBackend};
pub use codec::{
    decode_float, decode_int, decode_string, encode_float, encode_int, encode_string, PrefValue,
};
pub use config::PrefsConfig;
pub use error::{PrefsError, PrefsResult};
pub use namespace::{sanitize_name, Namespace, DEFAULT_MOUNT_POINT};
pub use path::normalize_virtual_path;
pub use storage::file_backend::{validate_file_key, VirtualFileBackend};
pub use storage::native::{MemoryNativePrefs, NativePrefsStore, NoopNativePrefs};
pub use storage::sync::{DurableSync, NoopDurableSync, RecordingDurableSync};
pub use storage::virtual_fs::{MemoryVirtualFs, StdVirtualFs, VirtualFs};
pub use store::PreferenceStore;
