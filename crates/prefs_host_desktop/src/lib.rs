//! Desktop implementations of the [`prefs_host`] collaborator contracts.
//!
//! The native strategy keeps every entry of one application in a JSON map file under the
//! application's data directory. The virtual-file strategy maps the namespace onto that same data
//! directory with [`StdVirtualFs`]; desktop filesystems are already durable, so sync is a no-op.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod json_map;

use std::path::Path;

use prefs_host::{
    BackendKind, NoopDurableSync, PreferenceStore, PrefsConfig, PrefsResult, StdVirtualFs,
};

pub use json_map::{JsonMapPrefs, PREFS_FILE_NAME};

/// Builds a [`PreferenceStore`] for `config` rooted at the host data directory `data_dir`.
///
/// Native entries live in `<data_dir>/<org>/<app>/prefs.json`; virtual-file entries live in
/// `<data_dir>/<mount>/<org>/<app>/<key>`.
///
/// # Errors
///
/// Returns an error when the native store directory cannot be created.
pub fn build_preference_store(
    config: &PrefsConfig,
    data_dir: &Path,
) -> PrefsResult<PreferenceStore> {
    let namespace = config.namespace();
    let kind = config.resolved_backend();
    log::debug!(
        "building desktop preference store: backend={} data_dir={} namespace={}",
        kind.as_str(),
        data_dir.display(),
        namespace.dir_path()
    );

    match kind {
        BackendKind::Native => {
            let root = data_dir
                .join(namespace.organization())
                .join(namespace.application());
            Ok(PreferenceStore::native(JsonMapPrefs::from_root(root)?))
        }
        BackendKind::VirtualFile => Ok(PreferenceStore::virtual_file(
            namespace,
            StdVirtualFs::new(data_dir),
            NoopDurableSync,
        )),
    }
}
