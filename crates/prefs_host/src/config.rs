//! TOML-backed preference store configuration.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    backend::{BackendKind, BackendSelection},
    error::{PrefsError, PrefsResult},
    namespace::{Namespace, DEFAULT_MOUNT_POINT},
};

fn default_mount_point() -> String {
    DEFAULT_MOUNT_POINT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
/// Application identity and backend choice for a preference store.
///
/// ```toml
/// organization = "My Co"
/// application = "Game"
/// mount-point = "/idbfs"
/// backend = "auto"
/// ```
pub struct PrefsConfig {
    /// Organization name; sanitized when the namespace is derived.
    pub organization: String,
    /// Application name; sanitized when the namespace is derived.
    pub application: String,
    /// Mount point of the persistent virtual filesystem.
    #[serde(default = "default_mount_point")]
    pub mount_point: String,
    /// Backend choice.
    #[serde(default)]
    pub backend: BackendSelection,
}

impl PrefsConfig {
    /// Config with default mount point and automatic backend selection.
    pub fn new(organization: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            application: application.into(),
            mount_point: default_mount_point(),
            backend: BackendSelection::Auto,
        }
    }

    /// Returns a copy with an explicit backend choice.
    pub fn with_backend(mut self, backend: BackendSelection) -> Self {
        self.backend = backend;
        self
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Config`] when the text is not a valid config.
    pub fn from_toml_str(body: &str) -> PrefsResult<Self> {
        toml::from_str(body).map_err(|err| PrefsError::Config(err.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Config`] when the file is unreadable or invalid.
    pub fn load(path: &Path) -> PrefsResult<Self> {
        let body = fs::read_to_string(path).map_err(|err| {
            PrefsError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        toml::from_str(&body).map_err(|err| {
            PrefsError::Config(format!("failed to parse {}: {err}", path.display()))
        })
    }

    /// Namespace derived from the identity strings.
    pub fn namespace(&self) -> Namespace {
        Namespace::with_mount(&self.mount_point, &self.organization, &self.application)
    }

    /// Backend after resolving `auto` against the current target.
    pub fn resolved_backend(&self) -> BackendKind {
        self.backend.resolve()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        process,
        time::{SystemTime, UNIX_EPOCH},
    };

    use pretty_assertions::assert_eq;

    use super::*;

    fn unique_test_root() -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "prefs-config-test-{}-{}",
            process::id(),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config =
            PrefsConfig::from_toml_str("organization = \"My Co!\"\napplication = \"Game/2\"\n")
                .expect("parse");
        assert_eq!(config, PrefsConfig::new("My Co!", "Game/2"));
        assert_eq!(config.namespace().dir_path(), "/idbfs/MyCo/Game2");
    }

    #[test]
    fn explicit_backend_and_mount_are_read() {
        let config = PrefsConfig::from_toml_str(
            r#"
organization = "Co"
application = "App"
mount-point = "/persist/"
backend = "virtual-file"
"#,
        )
        .expect("parse");
        assert_eq!(config.backend, BackendSelection::VirtualFile);
        assert_eq!(config.resolved_backend(), BackendKind::VirtualFile);
        assert_eq!(config.namespace().file_path("k"), "/persist/Co/App/k");
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let err = PrefsConfig::from_toml_str(
            "organization = \"Co\"\napplication = \"App\"\nbackend = \"cloud\"\n",
        )
        .expect_err("unknown backend");
        assert!(matches!(err, PrefsError::Config(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create root");
        let path = root.join("prefs.toml");
        fs::write(&path, "organization = \"Co\"\napplication = \"App\"\nbackend = \"native\"\n")
            .expect("write config");

        let loaded = PrefsConfig::load(&path).expect("load");
        assert_eq!(
            loaded,
            PrefsConfig::new("Co", "App").with_backend(BackendSelection::Native)
        );

        let err = PrefsConfig::load(&root.join("missing.toml")).expect_err("missing");
        assert!(err.to_string().contains("missing.toml"));

        let _ = fs::remove_dir_all(root);
    }
}
