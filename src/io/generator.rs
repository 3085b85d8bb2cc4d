//! Manifest generation
//!
//! Scans the `posts/` and `collections/` directories of a site and writes
//! `data/files.json`. File names follow `YYYY-MM-DD-title.md`, so ordering by
//! the 10-character prefix puts the newest documents first.

use crate::core::ContentKind;
use crate::error::{Result, StagexError};
use crate::io::manifest::{Manifest, DEFAULT_MANIFEST_PATH};
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Length of the `YYYY-MM-DD` prefix used for ordering
const DATE_PREFIX_LEN: usize = 10;

/// Configuration for the manifest generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Site root containing the content directories
    pub root: PathBuf,
    /// Manifest output path, relative to the root unless absolute
    pub output: PathBuf,
    /// Extension of content files, without the dot
    pub extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_MANIFEST_PATH),
            extension: "md".to_string(),
        }
    }
}

/// What a generator run produced
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub manifest: Manifest,
    pub output_path: PathBuf,
    /// Kinds whose source directory was missing
    pub missing_dirs: Vec<ContentKind>,
    /// Kinds whose source directory could not be read, with the reason
    pub unreadable_dirs: Vec<(ContentKind, String)>,
}

/// What a scan of the content directories found
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub manifest: Manifest,
    pub missing_dirs: Vec<ContentKind>,
    pub unreadable_dirs: Vec<(ContentKind, String)>,
}

impl ScanResult {
    /// Record the listing of one kind; a missing or unreadable directory
    /// contributes an empty list
    fn record(&mut self, kind: ContentKind, dir: &Path, listed: Result<Option<Vec<String>>>) {
        let files = match listed {
            Ok(Some(files)) => files,
            Ok(None) => {
                warn!("Directory not found: {}", dir.display());
                self.missing_dirs.push(kind);
                Vec::new()
            }
            Err(e) => {
                warn!("Could not read {}: {}", dir.display(), e);
                self.unreadable_dirs.push((kind, e.to_string()));
                Vec::new()
            }
        };
        match kind {
            ContentKind::Post => self.manifest.posts = files,
            ContentKind::Collection => self.manifest.collections = files,
        }
    }
}

impl GenerateReport {
    pub fn count(&self, kind: ContentKind) -> usize {
        self.manifest.files(kind).len()
    }
}

/// Builds the manifest from the content directories
pub struct ManifestGenerator {
    config: GeneratorConfig,
}

impl ManifestGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Create a new generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scan both directories without writing anything
    pub fn scan(&self) -> ScanResult {
        let mut scan = ScanResult::default();
        for kind in ContentKind::ALL {
            let dir = self.config.root.join(kind.directory());
            let listed = list_content_files(&dir, &self.config.extension);
            scan.record(kind, &dir, listed);
        }
        scan
    }

    /// Scan and write the manifest atomically.
    ///
    /// A write failure is the one error that should end the process.
    pub fn generate(&self) -> Result<GenerateReport> {
        let ScanResult {
            manifest,
            missing_dirs,
            unreadable_dirs,
        } = self.scan();
        let output_path = self.output_path();

        let content = manifest.to_json_pretty()?;
        write_atomic(&output_path, &content)?;

        info!(
            "Wrote {} ({} posts, {} collections)",
            output_path.display(),
            manifest.posts.len(),
            manifest.collections.len()
        );

        Ok(GenerateReport {
            manifest,
            output_path,
            missing_dirs,
            unreadable_dirs,
        })
    }

    fn output_path(&self) -> PathBuf {
        if self.config.output.is_absolute() {
            self.config.output.clone()
        } else {
            self.config.root.join(&self.config.output)
        }
    }
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// List the content files directly inside `dir`, newest date prefix first.
///
/// Returns `None` when the directory does not exist.
pub fn list_content_files(dir: &Path, extension: &str) -> Result<Option<Vec<String>>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            StagexError::transport(
                dir.display().to_string(),
                format!("error reading directory: {}", e),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if has_extension(&name, extension) {
            debug!("Found {}", entry.path().display());
            files.push(name.into_owned());
        }
    }

    sort_by_date_prefix(&mut files);
    Ok(Some(files))
}

fn has_extension(name: &str, extension: &str) -> bool {
    name.strip_suffix(extension)
        .map(|stem| stem.ends_with('.'))
        .unwrap_or(false)
}

fn date_prefix(name: &str) -> &str {
    match name.char_indices().nth(DATE_PREFIX_LEN) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// Stable sort, descending on the leading date prefix
pub fn sort_by_date_prefix(files: &mut [String]) {
    files.sort_by(|a, b| date_prefix(b).cmp(date_prefix(a)));
}

/// Write file atomically using temporary file
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent_dir).map_err(|e| StagexError::write_failed(path, e))?;

    let mut temp_file =
        NamedTempFile::new_in(parent_dir).map_err(|e| StagexError::write_failed(path, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StagexError::write_failed(path, e))?;
    temp_file
        .flush()
        .map_err(|e| StagexError::write_failed(path, e))?;

    temp_file
        .persist(path)
        .map_err(|e| StagexError::write_failed(path, format!("failed to persist temporary file: {}", e)))?;

    Ok(())
}
