//! Source resolver implementation.
//!
//! Pure string work: no network or filesystem access happens here.

use regex::Regex;

use crate::error::{Error, Result};
use crate::manifest::PackageSpec;

use super::spec::ResolvedSpec;

/// Resolve a declared package into a [`ResolvedSpec`].
///
/// An explicit `version` is used verbatim. Otherwise a version token is
/// parsed from the URL; if neither yields one the package is unresolvable.
pub fn resolve(name: &str, spec: &PackageSpec) -> Result<ResolvedSpec> {
    let version = match spec.version.as_deref() {
        Some(version) if !version.is_empty() => version.to_string(),
        _ => version_from_url(&spec.url).ok_or_else(|| Error::VersionUnresolved {
            name: name.to_string(),
        })?,
    };

    Ok(ResolvedSpec {
        name: name.to_string(),
        safe_name: safe_name(name),
        url: spec.url.clone(),
        version,
        sha256: spec.sha256.clone(),
        git: spec.git,
        exclude: spec.exclude.clone(),
    })
}

/// Replace path separators in a package name with dashes.
pub fn safe_name(name: &str) -> String {
    name.replace('/', "-")
}

/// Parse a version token from a release URL. First matching pattern wins.
///
/// A leading `v` on the tag is not part of the version: both
/// `.../download/v1.2.3/...` and `.../download/1.2.3/...` yield `1.2.3`.
fn version_from_url(url: &str) -> Option<String> {
    const PATTERNS: [&str; 3] = [
        r"/releases/download/v?([0-9A-Za-z.\-]+)",
        r"/archive/refs/tags/v?([0-9A-Za-z.\-]+)\.zip",
        r"/tags/v?([0-9]+\.[0-9]+\.[0-9]+)(?:\.zip)?$",
    ];

    for pattern in PATTERNS {
        if let Ok(re) = Regex::new(pattern)
            && let Some(captures) = re.captures(url)
        {
            return Some(captures[1].to_string());
        }
    }
    None
}
