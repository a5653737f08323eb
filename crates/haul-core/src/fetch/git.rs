//! Git sources: shallow clone, prune, pack.

use std::path::Path;
use std::process::Command;

use tempfile::{NamedTempFile, TempDir};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::fs::remove_path_if_exists;
use crate::source::ResolvedSpec;

/// Shallow-clone the repository at the resolved version, delete excluded
/// paths, and pack the remaining tree into a temporary zip archive.
///
/// The clone checkout is a [`TempDir`], removed on every return path.
pub(crate) fn clone_and_pack(spec: &ResolvedSpec) -> Result<NamedTempFile> {
    let checkout = TempDir::new()?;

    tracing::info!(url = %spec.url, version = %spec.version, "cloning repository");
    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--branch", &spec.version, &spec.url])
        .arg(checkout.path())
        .output()?;

    if !output.status.success() || !checkout.path().join(".git").exists() {
        return Err(Error::CloneFailed {
            url: spec.url.clone(),
            output: combined_output(&output),
        });
    }

    prune_excluded(checkout.path(), &spec.exclude)?;
    pack_tree(checkout.path())
}

/// Combined stdout and stderr of a finished process, trimmed.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{}{}", stdout, stderr).trim().to_string()
}

/// Delete every path under `root` matched by one of `patterns`.
fn prune_excluded(root: &Path, patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        let full = root.join(pattern);
        let Some(full) = full.to_str() else {
            continue;
        };
        let matches = glob::glob(full)
            .map_err(|e| Error::ArchiveFailed(format!("exclude pattern '{}': {}", pattern, e)))?;
        for path in matches.flatten() {
            tracing::debug!(path = %path.display(), "pruning excluded path");
            remove_path_if_exists(&path)?;
        }
    }
    Ok(())
}

/// Walk `root` depth-first and write every regular file into a new zip,
/// using root-relative forward-slash paths. The `.git` directory is not
/// packed.
fn pack_tree(root: &Path) -> Result<NamedTempFile> {
    let mut archive = tempfile::Builder::new()
        .prefix("haul-")
        .suffix(".zip")
        .tempfile()?;

    let mut zip = ZipWriter::new(&mut archive);
    let entries = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != std::ffi::OsStr::new(".git"));

    for entry in entries {
        let entry = entry.map_err(|e| Error::ArchiveFailed(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::ArchiveFailed(e.to_string()))?;
        let entry_name = relative.to_string_lossy().replace('\\', "/");

        let mut options = SimpleFileOptions::default();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = entry.metadata() {
                options = options.unix_permissions(metadata.permissions().mode());
            }
        }

        zip.start_file(entry_name, options)
            .map_err(|e| Error::ArchiveFailed(e.to_string()))?;
        let mut file = std::fs::File::open(entry.path())?;
        std::io::copy(&mut file, &mut zip).map_err(|e| Error::ArchiveFailed(e.to_string()))?;
    }

    zip.finish().map_err(|e| Error::ArchiveFailed(e.to_string()))?;

    Ok(archive)
}
