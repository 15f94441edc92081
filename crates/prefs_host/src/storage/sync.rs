//! Durable-sync capability for virtual filesystems that buffer writes in memory.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Flushes a virtual filesystem to its durable backing store.
pub trait DurableSync: Send + Sync {
    /// Starts a flush and reports whether it was accepted.
    fn sync(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
/// Sync for filesystems that are already durable.
pub struct NoopDurableSync;

impl DurableSync for NoopDurableSync {
    fn sync(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
/// Sync that counts invocations. Clones share the counter.
pub struct RecordingDurableSync {
    calls: Arc<AtomicUsize>,
}

impl RecordingDurableSync {
    /// Number of `sync` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DurableSync for RecordingDurableSync {
    fn sync(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sync_counts_across_clones() {
        let sync = RecordingDurableSync::default();
        let handle = sync.clone();
        assert!(sync.sync());
        assert!(handle.sync());
        assert_eq!(sync.calls(), 2);
        assert!(NoopDurableSync.sync());
    }
}
