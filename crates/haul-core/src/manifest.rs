//! Declared package input.
//!
//! The manifest is a JSON object keyed by package name. Entries are parsed
//! into typed values and validated when loaded, so a malformed declaration
//! fails up front instead of deep inside the pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One declared package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Archive URL, or repository URL when `git` is set.
    pub url: String,

    /// Explicit version. When absent, a version is parsed from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Expected SHA-256 digest of the fetched archive (hex, any case).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    /// True when the source is a git repository to clone.
    #[serde(default)]
    pub git: bool,

    /// Glob patterns deleted from the checkout before packing.
    /// Only meaningful for git sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// All declared packages, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    packages: BTreeMap<String, PackageSpec>,
}

impl Manifest {
    /// Load and validate the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Manifest(format!(
                "manifest not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Manifest(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
            .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate manifest content.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)
            .map_err(|e| Error::Manifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn get(&self, name: &str) -> Option<&PackageSpec> {
        self.packages.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PackageSpec)> {
        self.packages.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Reject declarations the pipeline could only fail on later.
    fn validate(&self) -> Result<()> {
        for (name, spec) in &self.packages {
            if spec.url.trim().is_empty() {
                return Err(Error::Manifest(format!("package '{}' has an empty url", name)));
            }
            for pattern in &spec.exclude {
                glob::Pattern::new(pattern).map_err(|e| {
                    Error::Manifest(format!(
                        "package '{}' has an invalid exclude pattern '{}': {}",
                        name, pattern, e
                    ))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_entry() {
        let manifest = Manifest::parse(
            r#"{
                "acme/widgets": {
                    "url": "https://github.com/acme/widgets.git",
                    "version": "2.1.0",
                    "sha256": "abc123",
                    "git": true,
                    "exclude": ["docs", "*.md"]
                }
            }"#,
        )
        .expect("parse should succeed");

        let spec = manifest.get("acme/widgets").expect("entry should exist");
        assert_eq!(spec.version.as_deref(), Some("2.1.0"));
        assert_eq!(spec.sha256.as_deref(), Some("abc123"));
        assert!(spec.git);
        assert_eq!(spec.exclude, vec!["docs".to_string(), "*.md".to_string()]);
    }

    #[test]
    fn optional_fields_default() {
        let manifest = Manifest::parse(
            r#"{"tool": {"url": "https://example.com/tool/releases/download/v1.0.0/tool.zip"}}"#,
        )
        .expect("parse should succeed");

        let spec = manifest.get("tool").expect("entry should exist");
        assert!(spec.version.is_none());
        assert!(spec.sha256.is_none());
        assert!(!spec.git);
        assert!(spec.exclude.is_empty());
    }

    #[test]
    fn missing_url_is_rejected() {
        let result = Manifest::parse(r#"{"tool": {"version": "1.0.0"}}"#);
        assert!(matches!(result, Err(Error::Manifest(_))));
    }

    #[test]
    fn empty_url_is_rejected() {
        let result = Manifest::parse(r#"{"tool": {"url": ""}}"#);
        let err = result.expect_err("empty url should be rejected");
        assert!(err.to_string().contains("tool"));
    }

    #[test]
    fn invalid_exclude_pattern_is_rejected_at_load() {
        let result = Manifest::parse(
            r#"{"tool": {"url": "https://example.com/r.git", "git": true, "exclude": ["[bad"]}}"#,
        );
        let err = result.expect_err("invalid pattern should be rejected");
        assert!(err.to_string().contains("[bad"));
    }

    #[test]
    fn iteration_is_name_ordered() {
        let manifest = Manifest::parse(
            r#"{
                "zeta": {"url": "https://example.com/z/tags/v1.0.0"},
                "alpha": {"url": "https://example.com/a/tags/v1.0.0"}
            }"#,
        )
        .expect("parse should succeed");

        let names: Vec<&str> = manifest.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
