//! Shared transport interop for browser bridge domains.
//!
//! This module routes calls to target-specific implementations while preserving a uniform API
//! for the storage adapters.

use prefs_host::PrefsResult;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn local_storage_get(key: &str) -> Result<Option<String>, String> {
    imp::local_storage_get(key)
}

pub fn local_storage_set(key: &str, value: &str) -> Result<(), String> {
    imp::local_storage_set(key, value)
}

pub fn local_storage_remove(key: &str) -> Result<(), String> {
    imp::local_storage_remove(key)
}

pub fn local_storage_keys() -> Result<Vec<String>, String> {
    imp::local_storage_keys()
}

pub fn fs_mkdir_tree(path: &str) -> PrefsResult<()> {
    imp::fs_mkdir_tree(path)
}

pub fn fs_write_text(path: &str, text: &str) -> PrefsResult<()> {
    imp::fs_write_text(path, text)
}

pub fn fs_read_text(path: &str) -> PrefsResult<String> {
    imp::fs_read_text(path)
}

pub fn fs_is_file(path: &str) -> PrefsResult<bool> {
    imp::fs_is_file(path)
}

pub fn fs_is_dir(path: &str) -> PrefsResult<bool> {
    imp::fs_is_dir(path)
}

pub fn fs_unlink(path: &str) -> PrefsResult<()> {
    imp::fs_unlink(path)
}

pub fn fs_read_dir(path: &str) -> PrefsResult<Vec<String>> {
    imp::fs_read_dir(path)
}

pub fn fs_sync_to_durable() -> Result<(), String> {
    imp::fs_sync_to_durable()
}
