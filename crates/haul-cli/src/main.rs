//! Haul - vendored package fetcher
//!
//! Usage:
//!   haul install            # install everything declared in deps.json
//!   haul install NAME       # install one declared package
//!   haul update [NAME]      # re-fetch and replace installed packages
//!   haul add NAME URL       # install a package straight from a URL
//!   haul uninstall NAME     # remove a package and its lock record
//!   haul init [PATH]        # create an empty manifest

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haul_core::context::ProjectContext;
use haul_core::error::Error;
use haul_core::fetch::RemoteFetcher;
use haul_core::manifest::{Manifest, PackageSpec};
use haul_core::ops::{self, InstallReport};

#[derive(Parser)]
#[command(name = "haul")]
#[command(about = "Fetch, verify and install vendored packages", long_about = None)]
struct Cli {
    /// Project root containing deps.json
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install declared packages (all of them, or one by name)
    Install {
        /// Package to install; omit to install everything declared
        name: Option<String>,

        /// Replace already installed versions
        #[arg(short, long)]
        force: bool,
    },

    /// Re-fetch and replace installed packages
    #[command(alias = "up")]
    Update {
        /// Package to update; omit to update everything declared
        name: Option<String>,
    },

    /// Install a single package straight from a URL, without declaring it
    Add {
        /// Package name to record in the lock file
        name: String,
        /// Archive URL, or repository URL with --git
        url: String,

        /// Explicit version (otherwise parsed from the URL)
        #[arg(long)]
        version: Option<String>,

        /// Expected SHA-256 digest of the archive
        #[arg(long)]
        sha256: Option<String>,

        /// Treat the URL as a git repository to clone
        #[arg(long)]
        git: bool,

        /// Glob pattern to delete from the checkout (repeatable, git only)
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Replace an already installed version
        #[arg(short, long)]
        force: bool,
    },

    /// Remove an installed package and its lock record
    #[command(alias = "rm")]
    Uninstall {
        /// Package to remove
        name: String,
    },

    /// Create an empty manifest
    Init {
        /// Directory to initialize (defaults to the project root)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haul=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let ctx = ProjectContext::at(&cli.root);

    match cli.command {
        Commands::Install { name, force } => run_install(&ctx, name.as_deref(), force),
        Commands::Update { name } => run_install(&ctx, name.as_deref(), true),
        Commands::Add {
            name,
            url,
            version,
            sha256,
            git,
            exclude,
            force,
        } => run_add(&ctx, name, url, version, sha256, git, exclude, force),
        Commands::Uninstall { name } => run_uninstall(&ctx, &name),
        Commands::Init { path } => run_init(&ctx, path),
    }
}

fn run_install(ctx: &ProjectContext, name: Option<&str>, force: bool) -> Result<()> {
    let manifest = Manifest::load(&ctx.manifest_path)?;

    let report = match name {
        Some(name) => {
            let spec = manifest.get(name).with_context(|| {
                format!(
                    "package '{}' is not declared in {}",
                    name,
                    ctx.manifest_path.display()
                )
            })?;
            ops::install_one(&RemoteFetcher, ctx, name, spec, force)?
        }
        None => ops::install_all(&RemoteFetcher, ctx, &manifest, force)?,
    };

    finish(report)
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    ctx: &ProjectContext,
    name: String,
    url: String,
    version: Option<String>,
    sha256: Option<String>,
    git: bool,
    exclude: Vec<String>,
    force: bool,
) -> Result<()> {
    let spec = PackageSpec {
        url,
        version,
        sha256,
        git,
        exclude,
    };
    let report = ops::install_one(&RemoteFetcher, ctx, &name, &spec, force)?;
    finish(report)
}

fn run_uninstall(ctx: &ProjectContext, name: &str) -> Result<()> {
    match ops::uninstall(ctx, name) {
        Ok(()) => {
            println!("uninstalled {}", name);
            Ok(())
        }
        // A name that was never installed is reported, not fatal.
        Err(Error::NotInstalled(_)) => {
            println!("package '{}' is not installed", name);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn run_init(ctx: &ProjectContext, path: Option<PathBuf>) -> Result<()> {
    let manifest_path = match path {
        Some(root) => root.join("deps.json"),
        None => ctx.manifest_path.clone(),
    };
    ops::init_manifest(&manifest_path)?;
    println!("created {}", manifest_path.display());
    Ok(())
}

/// Print the per-package outcomes and map them to an exit status.
fn finish(report: InstallReport) -> Result<()> {
    for name in &report.installed {
        println!("installed {}", name);
    }
    for name in &report.skipped {
        println!("{} already installed, skipped", name);
    }
    for (name, err) in &report.failed {
        eprintln!("failed {}: {}", name, err);
    }

    if !report.is_success() {
        bail!("{} package(s) failed", report.failed.len());
    }
    Ok(())
}
