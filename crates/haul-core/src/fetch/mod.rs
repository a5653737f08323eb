//! Producing a local zip archive for a package, whatever its source.

mod git;
mod http;

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::source::ResolvedSpec;

/// Produces a temporary zip archive for a resolved package.
///
/// The returned [`NamedTempFile`] owns the archive: dropping it deletes the
/// file, so every pipeline exit path cleans up automatically.
pub trait Fetcher {
    fn fetch(&self, spec: &ResolvedSpec) -> Result<NamedTempFile>;
}

/// Fetches real sources: direct archive downloads over HTTP, or shallow git
/// clones pruned and packed into a zip.
#[derive(Debug, Default)]
pub struct RemoteFetcher;

impl Fetcher for RemoteFetcher {
    fn fetch(&self, spec: &ResolvedSpec) -> Result<NamedTempFile> {
        if spec.git {
            git::clone_and_pack(spec)
        } else {
            http::download_archive(&spec.url)
        }
    }
}
