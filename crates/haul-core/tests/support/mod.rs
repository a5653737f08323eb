//! Shared helpers for pipeline tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use haul_core::error::{Error, Result};
use haul_core::fetch::Fetcher;
use haul_core::source::ResolvedSpec;

/// Build a zip archive in memory from `(path, content)` pairs.
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in files {
            zip.start_file(*name, options).expect("start_file should succeed");
            zip.write_all(content.as_bytes()).expect("write should succeed");
        }
        zip.finish().expect("finish should succeed");
    }
    buf.into_inner()
}

/// SHA-256 of `bytes`, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// In-memory [`Fetcher`]: serves canned archive bytes per package name and
/// records what was fetched, so the pipeline can be exercised without any
/// network or git access.
#[derive(Debug, Default)]
pub struct StubFetcher {
    archives: HashMap<String, Vec<u8>>,
    /// Names fetched, in order.
    pub fetched: RefCell<Vec<String>>,
    /// Temp archive paths handed to the pipeline.
    pub produced: RefCell<Vec<PathBuf>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archive(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(name.to_string(), bytes);
        self
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, spec: &ResolvedSpec) -> Result<NamedTempFile> {
        self.fetched.borrow_mut().push(spec.name.clone());
        let Some(bytes) = self.archives.get(&spec.name) else {
            return Err(Error::DownloadFailed {
                url: spec.url.clone(),
                reason: "no stub archive".to_string(),
            });
        };

        let mut archive = tempfile::Builder::new().suffix(".zip").tempfile()?;
        archive.write_all(bytes)?;
        archive.flush()?;
        self.produced.borrow_mut().push(archive.path().to_path_buf());
        Ok(archive)
    }
}
