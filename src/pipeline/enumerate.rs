//! File enumeration
//!
//! An [`Enumerator`] answers "which files of this kind should be ingested, in
//! what order". Failures never escape: a missing or broken manifest means
//! nothing to ingest.

use crate::core::ContentKind;
use crate::io::generator::list_content_files;
use crate::io::{ContentSource, Manifest};
use log::{debug, warn};
use std::path::PathBuf;

/// Ordered file names per content kind
pub trait Enumerator: Send + Sync {
    fn enumerate(&self, kind: ContentKind) -> Vec<String>;
}

/// Enumerates from a manifest fetched once at construction
#[derive(Debug, Clone, Default)]
pub struct ManifestEnumerator {
    manifest: Option<Manifest>,
}

impl ManifestEnumerator {
    /// Fetch the manifest, logging instead of failing when it is unavailable
    pub fn load(source: &dyn ContentSource, path: &str) -> Self {
        match Manifest::load(source, path) {
            Ok(manifest) => {
                debug!("Loaded manifest {} ({} files)", path, manifest.total());
                Self::from_manifest(manifest)
            }
            Err(e) => {
                warn!("Could not load manifest: {}", e);
                Self { manifest: None }
            }
        }
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        Self {
            manifest: Some(manifest),
        }
    }

    /// Whether the manifest was loaded
    pub fn is_available(&self) -> bool {
        self.manifest.is_some()
    }
}

impl Enumerator for ManifestEnumerator {
    fn enumerate(&self, kind: ContentKind) -> Vec<String> {
        self.manifest
            .as_ref()
            .map(|m| m.files(kind).to_vec())
            .unwrap_or_default()
    }
}

/// Enumerates by scanning the content directories, ordered like the generator
#[derive(Debug, Clone)]
pub struct DirectoryEnumerator {
    root: PathBuf,
    extension: String,
}

impl DirectoryEnumerator {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }
}

impl Enumerator for DirectoryEnumerator {
    fn enumerate(&self, kind: ContentKind) -> Vec<String> {
        let dir = self.root.join(kind.directory());
        match list_content_files(&dir, &self.extension) {
            Ok(Some(files)) => files,
            Ok(None) => {
                warn!("Directory not found: {}", dir.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Could not scan {}: {}", dir.display(), e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySource;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_enumerator() {
        let source = MemorySource::new().with_file(
            "data/files.json",
            r#"{"posts": ["b.md", "a.md"], "collections": []}"#,
        );
        let enumerator = ManifestEnumerator::load(&source, "data/files.json");
        assert!(enumerator.is_available());
        assert_eq!(enumerator.enumerate(ContentKind::Post), ["b.md", "a.md"]);
        assert!(enumerator.enumerate(ContentKind::Collection).is_empty());
    }

    #[test]
    fn test_manifest_failures_enumerate_nothing() {
        let source = MemorySource::new().with_file("data/broken.json", "{ nope");
        for path in ["data/missing.json", "data/broken.json"] {
            let enumerator = ManifestEnumerator::load(&source, path);
            assert!(!enumerator.is_available());
            assert!(enumerator.enumerate(ContentKind::Post).is_empty());
        }
    }

    #[test]
    fn test_directory_enumerator() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("posts/2025-01-01-a.md"), "").unwrap();
        fs::write(dir.path().join("posts/2025-02-01-b.md"), "").unwrap();

        let enumerator = DirectoryEnumerator::new(dir.path(), "md");
        assert_eq!(
            enumerator.enumerate(ContentKind::Post),
            ["2025-02-01-b.md", "2025-01-01-a.md"]
        );
        assert!(enumerator.enumerate(ContentKind::Collection).is_empty());
    }
}
