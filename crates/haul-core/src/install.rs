//! Extraction of a verified archive into the versioned install layout.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::lock::LockRecord;
use crate::source::ResolvedSpec;

/// Result of an install attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The archive was extracted; merge this record into the lock store.
    Installed(LockRecord),
    /// The target directory already existed and `force` was not set.
    /// Nothing was extracted and any existing lock record stays untouched.
    AlreadyInstalled,
}

/// Extract `archive` into `<vendor_dir>/<safe_name>@<version>`.
///
/// Consumes the archive tempfile, so it is deleted on every return path.
/// Without `force` an existing target directory short-circuits to
/// [`InstallOutcome::AlreadyInstalled`]; with `force` it is replaced. A
/// failed extraction removes the partial target so no half-extracted
/// directory is left behind.
pub fn install_archive(
    vendor_dir: &Path,
    spec: &ResolvedSpec,
    archive: NamedTempFile,
    digest: String,
    force: bool,
) -> Result<InstallOutcome> {
    let target = vendor_dir.join(spec.install_dir_name());

    if target.exists() {
        if !force {
            tracing::info!(name = %spec.name, version = %spec.version, "already installed, skipping");
            return Ok(InstallOutcome::AlreadyInstalled);
        }
        fs::remove_dir_all(&target)?;
    }

    fs::create_dir_all(&target)?;
    if let Err(err) = extract(archive.path(), &target) {
        let _ = fs::remove_dir_all(&target);
        return Err(err);
    }

    tracing::info!(name = %spec.name, path = %target.display(), "extracted package");
    Ok(InstallOutcome::Installed(LockRecord {
        version: spec.version.clone(),
        sha256: digest,
        git: spec.git,
    }))
}

/// Extract every entry of the zip at `archive_path` into `dest`.
fn extract(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive_path).map_err(|e| Error::ExtractFailed(e.to_string()))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::ExtractFailed(format!("not a zip archive: {}", e)))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::ExtractFailed(format!("bad zip entry {}: {}", i, e)))?;

        // Entries with unsafe paths are skipped rather than extracted.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(|e| Error::ExtractFailed(e.to_string()))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::ExtractFailed(e.to_string()))?;
        }
        let mut outfile =
            fs::File::create(&outpath).map_err(|e| Error::ExtractFailed(e.to_string()))?;
        std::io::copy(&mut entry, &mut outfile)
            .map_err(|e| Error::ExtractFailed(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let _ = fs::set_permissions(&outpath, fs::Permissions::from_mode(mode));
            }
        }
    }

    Ok(())
}
