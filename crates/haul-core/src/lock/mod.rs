//! Installed-state records and their persistence.

mod store;

pub use store::LockStore;

use serde::{Deserialize, Serialize};

/// Persisted installed-state for one package.
///
/// `sha256` is the digest actually computed from the fetched archive, which
/// becomes the trusted value when none was declared up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Installed version; matches the `@<version>` directory suffix.
    pub version: String,
    /// SHA-256 of the installed archive, lowercase hex.
    pub sha256: String,
    /// True when the package came from a git clone.
    pub git: bool,
}
