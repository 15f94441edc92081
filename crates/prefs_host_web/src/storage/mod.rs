//! Browser storage adapters for the `prefs_host` collaborator contracts.

pub mod emscripten_fs;
pub mod idbfs_sync;
pub mod local_prefs;
