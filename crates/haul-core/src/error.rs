//! Failure kinds shared by every pipeline stage.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving, fetching, verifying, installing or
/// removing a package, or while touching the manifest and lock files.
///
/// A failure aborts only the package it belongs to; bulk operations catch
/// these per package and keep going.
#[derive(Debug, Error)]
pub enum Error {
    /// No version was declared and none could be parsed from the URL.
    #[error("no version for '{name}': none declared and none recognized in its URL")]
    VersionUnresolved { name: String },

    /// Transport failure or non-success status while downloading an archive.
    #[error("download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// `git clone` exited non-zero or produced no checkout. Carries the
    /// combined process output for diagnostics.
    #[error("git clone failed for {url}:\n{output}")]
    CloneFailed { url: String, output: String },

    /// Failed to pack a cloned tree into a zip archive.
    #[error("failed to pack archive: {0}")]
    ArchiveFailed(String),

    /// The computed digest does not match the declared one. Fail-closed:
    /// the archive is discarded and never extracted.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    /// Extraction failed; the partially written target directory is removed.
    #[error("failed to extract archive: {0}")]
    ExtractFailed(String),

    /// Uninstall was asked for a package with no lock record.
    #[error("package '{0}' is not installed")]
    NotInstalled(String),

    /// Lock file could not be read, parsed or written.
    #[error("lock file error: {0}")]
    LockIo(String),

    /// Manifest could not be read, parsed, or failed validation.
    #[error("manifest error: {0}")]
    Manifest(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
