//! The ingestion pipeline
//!
//! ```text
//! Enumerator -> RecordBuilder -> Aggregator -> Catalog
//! ```
//!
//! A [`Strategy`] chosen at startup decides where records come from: building
//! them from documents listed in a manifest (or found by scanning the content
//! directories), or reading a precomputed aggregate. Either way the result is
//! a [`Catalog`] with the same shape.

pub mod aggregate;
pub mod builder;
pub mod enumerate;

pub use aggregate::{Aggregated, Aggregator};
pub use builder::RecordBuilder;
pub use enumerate::{DirectoryEnumerator, Enumerator, ManifestEnumerator};

use crate::catalog::{Catalog, FeaturedPolicy, SharedCatalog, DEFAULT_RELATED_MAX};
use crate::core::{ContentKind, ContentRecord};
use crate::io::{
    ContentSource, FsSource, FsSourceConfig, PrecomputedAggregate, DEFAULT_AGGREGATE_PATH,
    DEFAULT_MANIFEST_PATH,
};
use log::{info, warn};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for a pipeline run and the views built on it
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Site root the filesystem source reads from
    pub root: PathBuf,
    /// Documents larger than this are rejected
    pub max_file_size: Option<u64>,
    /// Extension of content files, without the dot
    pub extension: String,
    /// Logical path of the file manifest
    pub manifest_path: String,
    /// Logical path of the precomputed aggregate
    pub aggregate_path: String,
    /// Size of the featured view
    pub featured_count: usize,
    /// Size of the article grid
    pub grid_count: usize,
    /// Maximum related items on a detail page
    pub related_max: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_file_size: FsSourceConfig::default().max_file_size,
            extension: "md".to_string(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            aggregate_path: DEFAULT_AGGREGATE_PATH.to_string(),
            featured_count: 3,
            grid_count: 8,
            related_max: DEFAULT_RELATED_MAX,
        }
    }
}

/// Where records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Build documents listed in the manifest
    Manifest,
    /// Build documents found by scanning the content directories under a root
    Directory(PathBuf),
    /// Read already built records from the precomputed aggregate
    Precomputed,
}

impl Strategy {
    /// Pick the manifest when it can be fetched, else the aggregate when it
    /// can, else the manifest (which then yields an empty catalog).
    pub fn detect(source: &dyn ContentSource, config: &PipelineConfig) -> Self {
        if source.fetch_text(&config.manifest_path).is_ok() {
            Self::Manifest
        } else if source.fetch_text(&config.aggregate_path).is_ok() {
            Self::Precomputed
        } else {
            Self::Manifest
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => write!(f, "manifest"),
            Self::Directory(root) => write!(f, "directory ({})", root.display()),
            Self::Precomputed => write!(f, "precomputed"),
        }
    }
}

/// Runs ingestion passes against one content source
pub struct Pipeline<S> {
    source: S,
    config: PipelineConfig,
}

impl Pipeline<FsSource> {
    /// Pipeline over the filesystem at `config.root`
    pub fn open(config: PipelineConfig) -> Self {
        let source = FsSource::with_config(
            config.root.clone(),
            FsSourceConfig {
                max_file_size: config.max_file_size,
            },
        );
        Self::new(source, config)
    }

    /// Scan the content directories under the configured root
    pub fn directory_strategy(&self) -> Strategy {
        Strategy::Directory(self.config.root.clone())
    }
}

impl<S: ContentSource> Pipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn builder(&self) -> RecordBuilder<'_> {
        RecordBuilder::new(&self.source, self.config.extension.as_str())
    }

    /// Run one full ingestion pass
    pub fn run(&self, strategy: &Strategy) -> Catalog {
        info!("Building catalog using the {} strategy", strategy);
        let catalog = match self.enumerator(strategy) {
            Some(enumerator) => self.enumerate_and_build(enumerator.as_ref()),
            None => self.read_precomputed(),
        };
        info!("Catalog ready with {} record(s)", catalog.len());
        catalog
    }

    /// The enumerator behind `strategy`; `None` for the precomputed aggregate
    pub fn enumerator(&self, strategy: &Strategy) -> Option<Box<dyn Enumerator>> {
        match strategy {
            Strategy::Manifest => Some(Box::new(ManifestEnumerator::load(
                &self.source,
                &self.config.manifest_path,
            ))),
            Strategy::Directory(root) => Some(Box::new(DirectoryEnumerator::new(
                root,
                self.config.extension.as_str(),
            ))),
            Strategy::Precomputed => None,
        }
    }

    /// Rebuild into `shared`, swapping only once the pass is complete
    pub fn refresh(&self, shared: &SharedCatalog, strategy: &Strategy) -> Arc<Catalog> {
        shared.rebuild_with(|| self.run(strategy))
    }

    /// Records of one kind from `enumerator`, newest first
    pub fn aggregate(&self, kind: ContentKind, enumerator: &dyn Enumerator) -> Vec<ContentRecord> {
        Aggregator::new(self.builder()).aggregate(kind, enumerator)
    }

    /// Build both kinds and merge them; featured view uses recent collections
    pub fn enumerate_and_build(&self, enumerator: &dyn Enumerator) -> Catalog {
        let (posts, collections) = rayon::join(
            || self.aggregate(ContentKind::Post, enumerator),
            || self.aggregate(ContentKind::Collection, enumerator),
        );
        Catalog::new(posts, collections, FeaturedPolicy::RecentCollections)
    }

    /// Load the precomputed aggregate, or the built-in records when it is
    /// unavailable; featured view uses the `featured` flag
    pub fn read_precomputed(&self) -> Catalog {
        let aggregate = PrecomputedAggregate::load(&self.source, &self.config.aggregate_path)
            .unwrap_or_else(|e| {
                warn!("Could not load precomputed aggregate, using built-in records: {}", e);
                PrecomputedAggregate::builtin()
            });
        Catalog::new(
            aggregate.records(ContentKind::Post),
            aggregate.records(ContentKind::Collection),
            FeaturedPolicy::Flagged,
        )
    }

    /// Build every enumerated file and keep the per-file failures
    pub fn audit(&self, enumerator: &dyn Enumerator) -> Vec<(ContentKind, Aggregated)> {
        let aggregator = Aggregator::new(self.builder());
        ContentKind::ALL
            .into_iter()
            .map(|kind| (kind, aggregator.aggregate_files(kind, &enumerator.enumerate(kind))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySource;

    fn pipeline(source: MemorySource) -> Pipeline<MemorySource> {
        Pipeline::new(source, PipelineConfig::default())
    }

    #[test]
    fn test_detect_strategy() {
        let config = PipelineConfig::default();
        let both = MemorySource::new()
            .with_file("data/files.json", "{}")
            .with_file("data/posts.json", "{}");
        let aggregate_only = MemorySource::new().with_file("data/posts.json", "{}");

        assert_eq!(Strategy::detect(&both, &config), Strategy::Manifest);
        assert_eq!(Strategy::detect(&aggregate_only, &config), Strategy::Precomputed);
        assert_eq!(Strategy::detect(&MemorySource::new(), &config), Strategy::Manifest);
    }

    #[test]
    fn test_manifest_strategy() {
        let p = pipeline(
            MemorySource::new()
                .with_file(
                    "data/files.json",
                    r#"{"posts": ["p.md"], "collections": ["c.md"]}"#,
                )
                .with_file("posts/p.md", "---\ntitle: P\ndate: 2025-01-01\n---\n")
                .with_file("collections/c.md", "---\ntitle: C\ndate: 2024-01-01\n---\n"),
        );
        let catalog = p.run(&Strategy::Manifest);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.policy(), FeaturedPolicy::RecentCollections);
        assert_eq!(catalog.featured(3)[0].id(), "c");
    }

    #[test]
    fn test_missing_manifest_yields_empty_catalog() {
        let catalog = pipeline(MemorySource::new()).run(&Strategy::Manifest);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_precomputed_falls_back_to_builtin() {
        let catalog = pipeline(MemorySource::new()).run(&Strategy::Precomputed);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.policy(), FeaturedPolicy::Flagged);
        assert!(!catalog.featured(3).is_empty());
    }

    #[test]
    fn test_refresh_swaps_catalog() {
        let p = pipeline(MemorySource::new());
        let shared = SharedCatalog::empty(FeaturedPolicy::Flagged);
        let catalog = p.refresh(&shared, &Strategy::Precomputed);
        assert_eq!(shared.load().len(), catalog.len());
        assert!(!shared.load().is_empty());
    }

    #[test]
    fn test_audit_reports_failures() {
        let p = pipeline(
            MemorySource::new()
                .with_file("posts/ok.md", "---\ntitle: ok\n---\n")
                .with_file("posts/bad.md", "---\ntags: [x\n---\n"),
        );
        let enumerator = ManifestEnumerator::from_manifest(crate::io::Manifest {
            posts: vec!["ok.md".into(), "bad.md".into()],
            collections: vec![],
        });
        let audit = p.audit(&enumerator);
        assert_eq!(audit.len(), 2);
        let (kind, posts) = &audit[0];
        assert_eq!(*kind, ContentKind::Post);
        assert_eq!(posts.records.len(), 1);
        assert_eq!(posts.failures.len(), 1);
    }
}
