//! Install orchestration: resolve, fetch, verify, extract, record.

use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::install::{InstallOutcome, install_archive};
use crate::lock::LockStore;
use crate::manifest::{Manifest, PackageSpec};
use crate::{source, verify};

/// Per-package outcomes of one install run.
///
/// A failed package never aborts the run; it is recorded here and the
/// remaining packages are still attempted.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Packages freshly installed and recorded in the lock store.
    pub installed: Vec<String>,
    /// Packages whose target directory already existed (no force).
    pub skipped: Vec<String>,
    /// Packages whose pipeline failed, with the failure.
    pub failed: Vec<(String, Error)>,
}

impl InstallReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the pipeline for every package in the manifest, in name order, then
/// persist the lock store once.
pub fn install_all(
    fetcher: &dyn Fetcher,
    ctx: &ProjectContext,
    manifest: &Manifest,
    force: bool,
) -> Result<InstallReport> {
    install_packages(fetcher, ctx, manifest.iter(), force)
}

/// Run the pipeline for a single package and persist immediately.
pub fn install_one(
    fetcher: &dyn Fetcher,
    ctx: &ProjectContext,
    name: &str,
    spec: &PackageSpec,
    force: bool,
) -> Result<InstallReport> {
    install_packages(fetcher, ctx, std::iter::once((name, spec)), force)
}

fn install_packages<'a>(
    fetcher: &dyn Fetcher,
    ctx: &ProjectContext,
    packages: impl Iterator<Item = (&'a str, &'a PackageSpec)>,
    force: bool,
) -> Result<InstallReport> {
    let mut lock = LockStore::load(&ctx.lock_path)?;
    std::fs::create_dir_all(&ctx.vendor_dir)?;

    let mut report = InstallReport::default();
    for (name, spec) in packages {
        match install_package(fetcher, ctx, name, spec, force) {
            Ok(InstallOutcome::Installed(record)) => {
                lock.upsert(name, record);
                report.installed.push(name.to_string());
            }
            Ok(InstallOutcome::AlreadyInstalled) => report.skipped.push(name.to_string()),
            Err(err) => {
                tracing::warn!(package = name, error = %err, "install failed");
                report.failed.push((name.to_string(), err));
            }
        }
    }

    lock.persist()?;
    Ok(report)
}

/// One package's pipeline. Any error aborts this package only and leaves
/// its lock record unchanged.
fn install_package(
    fetcher: &dyn Fetcher,
    ctx: &ProjectContext,
    name: &str,
    spec: &PackageSpec,
    force: bool,
) -> Result<InstallOutcome> {
    let resolved = source::resolve(name, spec)?;

    // Already-present targets are detected before any network work.
    let target = ctx.vendor_dir.join(resolved.install_dir_name());
    if !force && target.exists() {
        tracing::info!(name, version = %resolved.version, "already installed, skipping");
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    let archive = fetcher.fetch(&resolved)?;
    // On a digest mismatch the archive tempfile is dropped here, deleting
    // it before extraction could ever run.
    let digest = verify::verify_archive(archive.path(), resolved.sha256.as_deref())?;

    install_archive(&ctx.vendor_dir, &resolved, archive, digest, force)
}
