//! Manifest bootstrap.

use std::path::Path;

use crate::error::{Error, Result};

/// Create an empty manifest at `path`. Refuses to overwrite one that
/// already exists.
pub fn init_manifest(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::Manifest(format!(
            "manifest already exists: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, "{}\n")?;
    Ok(())
}
