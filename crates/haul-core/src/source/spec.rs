//! Resolved source specification.

/// A package declaration with the version pinned down and a filesystem-safe
/// name derived. Created once per pipeline run and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpec {
    /// Declared package name, unique within the manifest.
    pub name: String,
    /// `name` with path separators replaced, safe for directory names.
    pub safe_name: String,
    /// Archive or repository URL.
    pub url: String,
    /// Concrete version; never empty.
    pub version: String,
    /// Expected archive digest, when one was declared.
    pub sha256: Option<String>,
    /// True when the source is a git repository.
    pub git: bool,
    /// Glob patterns pruned from a git checkout before packing.
    pub exclude: Vec<String>,
}

impl ResolvedSpec {
    /// Directory name this package installs into, `<safe_name>@<version>`.
    pub fn install_dir_name(&self) -> String {
        format!("{}@{}", self.safe_name, self.version)
    }
}
