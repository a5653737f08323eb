//! Project paths the pipeline operates on.

use std::path::{Path, PathBuf};

/// Locations of the manifest, the lock file and the install root for one
/// project. Built once per invocation and passed to every operation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Manifest of declared packages (`deps.json`).
    pub manifest_path: PathBuf,
    /// Persisted lock records (`deps.lock`).
    pub lock_path: PathBuf,
    /// Root directory holding one `<name>@<version>` directory per install.
    pub vendor_dir: PathBuf,
}

impl ProjectContext {
    /// Context with the default file names under `root`.
    pub fn at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            manifest_path: root.join("deps.json"),
            lock_path: root.join("deps.lock"),
            vendor_dir: root.join("vendor"),
        }
    }

    /// Context from explicitly chosen paths.
    pub fn from_paths(manifest_path: PathBuf, lock_path: PathBuf, vendor_dir: PathBuf) -> Self {
        Self {
            manifest_path,
            lock_path,
            vendor_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_under_root() {
        let ctx = ProjectContext::at("/work/project");
        assert_eq!(ctx.manifest_path, PathBuf::from("/work/project/deps.json"));
        assert_eq!(ctx.lock_path, PathBuf::from("/work/project/deps.lock"));
        assert_eq!(ctx.vendor_dir, PathBuf::from("/work/project/vendor"));
    }
}
