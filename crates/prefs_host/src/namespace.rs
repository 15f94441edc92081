//! Application-identity namespaces for file-backed preferences.

/// Mount point of the persistent virtual filesystem used when none is configured.
pub const DEFAULT_MOUNT_POINT: &str = "/idbfs";

/// Strips every character outside `[0-9a-zA-Z_.-]`.
///
/// Total and idempotent; a name made only of other characters becomes the empty string.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Directory that holds every preference file of one application identity.
///
/// The directory is `<mount>/<organization>/<application>`, with both identity strings sanitized
/// on construction.
pub struct Namespace {
    mount: String,
    organization: String,
    application: String,
}

impl Namespace {
    /// Builds a namespace under [`DEFAULT_MOUNT_POINT`].
    pub fn new(organization: &str, application: &str) -> Self {
        Self::with_mount(DEFAULT_MOUNT_POINT, organization, application)
    }

    /// Builds a namespace under an explicit mount point.
    ///
    /// Trailing slashes on `mount` are dropped so paths never contain an accidental `//` before
    /// the organization segment.
    pub fn with_mount(mount: &str, organization: &str, application: &str) -> Self {
        Self {
            mount: mount.trim_end_matches('/').to_string(),
            organization: sanitize_name(organization),
            application: sanitize_name(application),
        }
    }

    /// Mount point without a trailing slash.
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Sanitized organization segment.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Sanitized application segment.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Virtual directory path of the namespace.
    pub fn dir_path(&self) -> String {
        format!("{}/{}/{}", self.mount, self.organization, self.application)
    }

    /// Virtual file path of `key` inside the namespace.
    pub fn file_path(&self, key: &str) -> String {
        format!("{}/{key}", self.dir_path())
    }

    /// Prefix for stores that share one flat key space across applications.
    pub fn key_prefix(&self) -> String {
        format!("{}/{}/", self.organization, self.application)
    }
}
