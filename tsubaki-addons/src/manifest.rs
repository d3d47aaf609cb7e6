//! Directory discovery via addon manifests
//!
//! Every `*.json` file in the addons directory declares one addon:
//!
//! ```json
//! { "kind": "echo", "name": "loud-echo", "domains": ["echo", "shout"] }
//! ```
//!
//! `kind` must name a `register_addon!` registration linked into the host.
//! `name` and `domains` override the registration's own metadata when given.
//! Broken manifests are logged and skipped; they never fail the registry.

use crate::catalog::{DiscoveredAddon, Discover};
use crate::registration;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use tsubaki_core::{AddonError, AddonMetadata, DomainSet};

/// On-disk addon declaration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddonManifest {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domains: Option<DomainSet>,
}

#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    dir: PathBuf,
}

impl ManifestCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Manifest files in the directory, sorted by file name
    pub fn manifest_paths(&self) -> Result<Vec<PathBuf>, AddonError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| AddonError::io(&self.dir, e))?;
        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().map_or(false, |e| e == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    pub fn read_manifest(path: &Path) -> Result<AddonManifest, AddonError> {
        let content = fs::read_to_string(path).map_err(|e| AddonError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| AddonError::manifest(path, e))
    }

    /// Read a manifest and pair it with its registered factory
    pub fn load(path: &Path) -> Result<DiscoveredAddon, AddonError> {
        let manifest = Self::read_manifest(path)?;
        let reg = registration::registration(&manifest.kind)
            .ok_or_else(|| AddonError::unknown_kind(path, &manifest.kind))?;

        let declared = reg.metadata();
        let metadata = AddonMetadata {
            name: manifest.name.or(declared.name),
            domains: manifest.domains.unwrap_or(declared.domains),
        };
        Ok(DiscoveredAddon {
            factory: Arc::new(reg.factory),
            metadata,
        })
    }
}

impl Discover for ManifestCatalog {
    fn discover(&self) -> Vec<DiscoveredAddon> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "Addons directory not found, skipping");
            return Vec::new();
        }

        let paths = match self.manifest_paths() {
            Ok(paths) => paths,
            Err(e) => {
                warn!(error = %e, "Cannot scan addons directory");
                return Vec::new();
            }
        };

        paths
            .iter()
            .filter_map(|path| match Self::load(path) {
                Ok(addon) => {
                    debug!(manifest = %path.display(), "Loaded addon manifest");
                    Some(addon)
                }
                Err(e) => {
                    warn!(code = e.code(), error = %e, "Skipping addon manifest");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddonContract;
    use tsubaki_core::{codes, AddonOutput};

    #[derive(Default)]
    struct Probe;

    impl AddonContract for Probe {
        fn execute(&self, args: &[String]) -> AddonOutput {
            AddonOutput::handled().with_callback(args.len())
        }
    }

    crate::register_addon!(Probe {
        kind: "manifest-probe",
        name: Some("probe"),
        domains: ["probe", "diagnostics"],
    });

    fn write(dir: &Path, file: &str, content: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ManifestCatalog::new(dir.path().join("does-not-exist"));
        assert!(catalog.discover().is_empty());
    }

    #[test]
    fn test_manifest_overrides_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "probe.json",
            r#"{ "kind": "Manifest-Probe", "name": "custom", "domains": ["Custom"] }"#,
        );
        let addon = ManifestCatalog::load(&path).unwrap();
        assert_eq!(addon.metadata.name.as_deref(), Some("custom"));
        assert!(addon.metadata.domains.contains("custom"));
        assert!(!addon.metadata.domains.contains("probe"));
        let out = (addon.factory)().execute(&["a".to_string(), "b".to_string()]);
        assert_eq!(out.callback.unwrap().downcast::<usize>().unwrap(), 2);
    }

    #[test]
    fn test_manifest_inherits_registration_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "probe.json", r#"{ "kind": "manifest-probe" }"#);
        let addon = ManifestCatalog::load(&path).unwrap();
        assert_eq!(addon.metadata.name.as_deref(), Some("probe"));
        assert!(addon.metadata.domains.contains("diagnostics"));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(dir.path(), "broken.json", "{ not json");
        let unknown = write(dir.path(), "unknown.json", r#"{ "kind": "nobody" }"#);
        assert_eq!(ManifestCatalog::load(&broken).unwrap_err().code(), codes::MANIFEST_ERROR);
        let err = ManifestCatalog::load(&unknown).unwrap_err();
        assert_eq!(err.code(), codes::UNKNOWN_KIND);
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn test_discover_skips_bad_manifests_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"{ "kind": "manifest-probe", "name": "second" }"#);
        write(dir.path(), "a.json", r#"{ "kind": "manifest-probe", "name": "first" }"#);
        write(dir.path(), "c.json", r#"{ "kind": "missing-kind" }"#);
        write(dir.path(), "notes.txt", "ignored");
        let names: Vec<_> = ManifestCatalog::new(dir.path())
            .discover()
            .into_iter()
            .filter_map(|d| d.metadata.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
