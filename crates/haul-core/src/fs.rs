//! Filesystem primitives shared across the pipeline.

use std::path::Path;

use crate::error::Result;

/// Remove a path (file or directory) if it exists.
///
/// Returns `Ok(true)` if something was removed, `Ok(false)` if the path
/// didn't exist.
pub fn remove_path_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let metadata = std::fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}
