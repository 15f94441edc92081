//! Browser capability bridge used by the `prefs_host_web` storage adapters.
//!
//! `localStorage` calls report plain string errors that the native-store adapter wraps; Emscripten
//! FS calls already produce [`prefs_host::PrefsError`] values carrying the failed path.

mod interop;

pub(crate) use interop::{
    fs_is_dir, fs_is_file, fs_mkdir_tree, fs_read_dir, fs_read_text, fs_sync_to_durable,
    fs_unlink, fs_write_text, local_storage_get, local_storage_keys, local_storage_remove,
    local_storage_set,
};
