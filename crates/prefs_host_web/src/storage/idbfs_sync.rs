//! IDBFS durable sync.

use prefs_host::DurableSync;

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Pushes the in-memory Emscripten filesystem to IndexedDB with `FS.syncfs(false, ..)`.
///
/// The flush completes asynchronously in the browser; `sync` only reports whether it was started.
/// Failures, immediate or reported later through the callback, are logged and never raised.
pub struct IdbfsSync;

impl DurableSync for IdbfsSync {
    fn sync(&self) -> bool {
        match bridge::fs_sync_to_durable() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("IDBFS sync could not start: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_idbfs_sync_reports_failure() {
        assert!(!IdbfsSync.sync());
    }
}
