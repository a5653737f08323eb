//! Uninstall: remove the installed directory and its lock record.

use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::fs::remove_path_if_exists;
use crate::lock::LockStore;
use crate::source;

/// Remove `name`'s installed directory and lock record, then persist.
///
/// A name with no lock record is reported as [`Error::NotInstalled`] and
/// nothing on disk is touched. A record whose directory is already gone is
/// tolerated; the record is still removed.
pub fn uninstall(ctx: &ProjectContext, name: &str) -> Result<()> {
    let mut lock = LockStore::load(&ctx.lock_path)?;
    let Some(record) = lock.remove(name) else {
        return Err(Error::NotInstalled(name.to_string()));
    };

    let dir = ctx
        .vendor_dir
        .join(format!("{}@{}", source::safe_name(name), record.version));
    if remove_path_if_exists(&dir)? {
        tracing::info!(name, path = %dir.display(), "removed install directory");
    }

    lock.persist()?;
    Ok(())
}
