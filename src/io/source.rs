//! Content sources
//!
//! The pipeline never touches the filesystem directly. It asks a
//! [`ContentSource`] for the text behind a logical path such as
//! `posts/2025-06-01-wicked.md` or `data/files.json`.

use crate::error::{Result, StagexError};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Fetch text by logical path
pub trait ContentSource: Send + Sync {
    fn fetch_text(&self, path: &str) -> Result<String>;
}

impl<T: ContentSource + ?Sized> ContentSource for &T {
    fn fetch_text(&self, path: &str) -> Result<String> {
        (**self).fetch_text(path)
    }
}

impl<T: ContentSource + ?Sized> ContentSource for Box<T> {
    fn fetch_text(&self, path: &str) -> Result<String> {
        (**self).fetch_text(path)
    }
}

/// Configuration for the filesystem source
#[derive(Debug, Clone)]
pub struct FsSourceConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<u64>,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Reads logical paths relative to a site root directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    config: FsSourceConfig,
}

impl FsSource {
    /// Create a new source with default configuration
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, FsSourceConfig::default())
    }

    /// Create a new source with custom configuration
    pub fn with_config(root: impl Into<PathBuf>, config: FsSourceConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path under the root, refusing to escape it
    fn resolve(&self, logical: &str) -> Result<PathBuf> {
        let relative = Path::new(logical);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(StagexError::transport(
                logical,
                "path must stay inside the content root",
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ContentSource for FsSource {
    fn fetch_text(&self, logical: &str) -> Result<String> {
        let path = self.resolve(logical)?;

        if !path.is_file() {
            return Err(StagexError::transport(logical, "no such file"));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(&path).map_err(|e| StagexError::transport(logical, e))?;
            if metadata.len() > max_size {
                return Err(StagexError::transport(
                    logical,
                    format!(
                        "file too large: {} bytes (limit: {} bytes)",
                        metadata.len(),
                        max_size
                    ),
                ));
            }
        }

        fs::read_to_string(&path).map_err(|e| StagexError::transport(logical, e))
    }
}

/// In-memory source keyed by logical path
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl ContentSource for MemorySource {
    fn fetch_text(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StagexError::transport(path, "no such file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_source_reads_relative_paths() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("posts/a.md"), "hello").unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(source.fetch_text("posts/a.md").unwrap(), "hello");
        assert!(matches!(
            source.fetch_text("posts/missing.md"),
            Err(StagexError::Transport { .. })
        ));
    }

    #[test]
    fn test_fs_source_refuses_escapes() {
        let dir = TempDir::new().unwrap();
        let source = FsSource::new(dir.path());
        assert!(source.fetch_text("../etc/passwd").is_err());
        assert!(source.fetch_text("/etc/passwd").is_err());
    }

    #[test]
    fn test_fs_source_size_limit() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.md"), "x".repeat(64)).unwrap();

        let source = FsSource::with_config(
            dir.path(),
            FsSourceConfig {
                max_file_size: Some(16),
            },
        );
        let err = source.fetch_text("big.md").unwrap_err();
        assert!(err.to_string().contains("file too large"));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with_file("data/files.json", "{}");
        assert_eq!(source.fetch_text("data/files.json").unwrap(), "{}");
        assert!(source.fetch_text("nope").is_err());
    }
}
