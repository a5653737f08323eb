//! Top-level operations consumed by the CLI.

mod init;
mod install;
mod uninstall;

pub use init::init_manifest;
pub use install::{InstallReport, install_all, install_one};
pub use uninstall::uninstall;
