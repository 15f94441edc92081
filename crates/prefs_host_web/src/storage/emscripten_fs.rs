//! Emscripten `FS`-backed virtual filesystem.
//!
//! Browser builds mount an IDBFS filesystem at the namespace mount point; this adapter reaches it
//! through the global `FS` object exported by the Emscripten runtime. Paths are passed through
//! unchanged.

use prefs_host::{PrefsResult, VirtualFs};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Virtual filesystem over the Emscripten runtime's `FS` API.
pub struct EmscriptenFs;

impl VirtualFs for EmscriptenFs {
    fn create_dir_all(&self, path: &str) -> PrefsResult<()> {
        bridge::fs_mkdir_tree(path)
    }

    fn write_text(&self, path: &str, text: &str) -> PrefsResult<()> {
        bridge::fs_write_text(path, text)
    }

    fn read_text(&self, path: &str) -> PrefsResult<Option<String>> {
        if !bridge::fs_is_file(path)? {
            return Ok(None);
        }
        bridge::fs_read_text(path).map(Some)
    }

    fn exists(&self, path: &str) -> PrefsResult<bool> {
        bridge::fs_is_file(path)
    }

    fn remove_file(&self, path: &str) -> PrefsResult<bool> {
        if !bridge::fs_is_file(path)? {
            return Ok(false);
        }
        bridge::fs_unlink(path)?;
        Ok(true)
    }

    fn list_files(&self, dir: &str) -> PrefsResult<Vec<String>> {
        if !bridge::fs_is_dir(dir)? {
            return Ok(Vec::new());
        }
        let base = dir.trim_end_matches('/');
        let mut files = Vec::new();
        for name in bridge::fs_read_dir(dir)? {
            if bridge::fs_is_file(&format!("{base}/{name}"))? {
                files.push(name);
            }
        }
        Ok(files)
    }
}
