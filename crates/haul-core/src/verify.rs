//! Archive integrity checking.

use std::fs::File;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// SHA-256 of the file at `path`, as lowercase hex.
pub fn file_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Digest the archive and, when a digest was declared, enforce a
/// case-insensitive match. A mismatch is fail-closed: the caller must
/// discard the archive and never extract it.
///
/// Returns the computed digest, which becomes the recorded value when no
/// expectation was declared.
pub fn verify_archive(path: &Path, expected: Option<&str>) -> Result<String> {
    let actual = file_digest(path)?;
    if let Some(expected) = expected {
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(Error::HashMismatch {
                expected: expected.to_ascii_lowercase(),
                actual,
            });
        }
        tracing::debug!(digest = %actual, "checksum verified");
    }
    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HELLO_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn hello_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("archive.zip");
        let mut file = File::create(&path).expect("create should succeed");
        file.write_all(b"hello world").expect("write should succeed");
        path
    }

    #[test]
    fn digest_matches_known_value() {
        let temp = tempfile::TempDir::new().expect("tempdir should succeed");
        let path = hello_file(temp.path());
        assert_eq!(file_digest(&path).expect("digest should succeed"), HELLO_SHA256);
    }

    #[test]
    fn declared_digest_comparison_is_case_insensitive() {
        let temp = tempfile::TempDir::new().expect("tempdir should succeed");
        let path = hello_file(temp.path());

        let upper = HELLO_SHA256.to_ascii_uppercase();
        let digest = verify_archive(&path, Some(&upper)).expect("verify should succeed");
        assert_eq!(digest, HELLO_SHA256);
    }

    #[test]
    fn no_declared_digest_returns_computed_value() {
        let temp = tempfile::TempDir::new().expect("tempdir should succeed");
        let path = hello_file(temp.path());
        assert_eq!(
            verify_archive(&path, None).expect("verify should succeed"),
            HELLO_SHA256
        );
    }

    #[test]
    fn mismatch_reports_both_digests() {
        let temp = tempfile::TempDir::new().expect("tempdir should succeed");
        let path = hello_file(temp.path());

        let declared = "00".repeat(32);
        let err = verify_archive(&path, Some(&declared)).expect_err("mismatch should fail");
        match err {
            Error::HashMismatch { expected, actual } => {
                assert_eq!(expected, declared);
                assert_eq!(actual, HELLO_SHA256);
            }
            other => panic!("expected HashMismatch, got {:?}", other),
        }
    }
}
