//! Haul Core Library
//!
//! Fetches externally hosted packages (direct archive URLs or shallow git
//! clones), verifies their SHA-256 digests, extracts them into a versioned
//! `vendor/` layout and reconciles a persisted lock file describing what is
//! installed.

pub mod context;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod install;
pub mod lock;
pub mod manifest;
pub mod ops;
pub mod source;
pub mod verify;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::context::ProjectContext;
    pub use crate::error::{Error, Result};
    pub use crate::fetch::{Fetcher, RemoteFetcher};
    pub use crate::install::InstallOutcome;
    pub use crate::lock::{LockRecord, LockStore};
    pub use crate::manifest::{Manifest, PackageSpec};
    pub use crate::ops::{InstallReport, install_all, install_one, uninstall};
    pub use crate::source::ResolvedSpec;
}
