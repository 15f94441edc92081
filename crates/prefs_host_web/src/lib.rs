//! Browser (`wasm32`) implementations of the [`prefs_host`] collaborator contracts.
//!
//! This crate wires the preference store to browser capabilities: `localStorage` for the native
//! strategy, the Emscripten `FS` object for the virtual-file strategy, and `FS.syncfs` as the
//! durable sync that pushes IDBFS contents to IndexedDB.
//!
//! Bridge bindings live under `bridge/`, with `bridge::interop` holding the wasm and non-wasm
//! transport glue. Non-wasm builds get inert fallbacks so the adapters stay testable on any host.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod storage;

pub use adapters::{
    build_preference_store, durable_sync, host_strategy_name, native_prefs_store,
    selected_host_strategy, virtual_fs, DurableSyncAdapter, HostStrategy, NativePrefsAdapter,
    VirtualFsAdapter,
};
pub use storage::emscripten_fs::EmscriptenFs;
pub use storage::idbfs_sync::IdbfsSync;
pub use storage::local_prefs::WebLocalPrefs;
