//! stagex: content ingestion for a static performance-review site
//!
//! Markdown documents with a `---`-delimited front matter block are turned
//! into typed [`ContentRecord`]s, merged into a newest-first [`Catalog`], and
//! served through featured, grid, search, and detail views.
//!
//! # Quick Start
//!
//! ## Building a catalog from a site root
//!
//! ```rust,no_run
//! use stagex::{Pipeline, PipelineConfig, Strategy, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig {
//!         root: "site".into(),
//!         ..Default::default()
//!     };
//!     let pipeline = Pipeline::open(config);
//!     let strategy = Strategy::detect(pipeline.source(), pipeline.config());
//!     let catalog = pipeline.run(&strategy);
//!
//!     for record in catalog.grid(8) {
//!         println!("{} {}", record.display_date(), record.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing front matter
//!
//! ```rust
//! use stagex::core::front_matter;
//!
//! let text = "---\ntitle: \"레베카\"\ntags: [뮤지컬, 서울]\n---\nbody";
//! let fm = front_matter::parse(text).unwrap().unwrap();
//! assert_eq!(fm.get_str("title"), Some("레베카"));
//! assert_eq!(fm.get_list("tags").unwrap(), ["뮤지컬", "서울"]);
//! ```
//!
//! ## Generating the manifest
//!
//! ```rust,no_run
//! use stagex::{GeneratorConfig, ManifestGenerator, Result};
//!
//! fn main() -> Result<()> {
//!     let generator = ManifestGenerator::with_config(GeneratorConfig {
//!         root: "site".into(),
//!         ..Default::default()
//!     });
//!     let report = generator.generate()?;
//!     println!("wrote {}", report.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: front matter parser, documents, records, dates
//! - [`io`]: content sources, manifest, precomputed aggregate, generator
//! - [`pipeline`]: enumeration, record building, concurrent aggregation
//! - [`catalog`]: merged store, views, detail pages, atomic replacement
//! - [`error`]: the error type shared by all of the above

pub use error::{ErrorSeverity, Result, StagexError};

pub use core::{ContentKind, ContentRecord, Document, FrontMatter, FrontMatterValue, RawDocument};

pub use io::{
    ContentSource, FsSource, FsSourceConfig, GenerateReport, GeneratorConfig, Manifest,
    ManifestGenerator, MemorySource, PrecomputedAggregate,
};

pub use pipeline::{Pipeline, PipelineConfig, Strategy};

pub use catalog::{Catalog, Detail, DetailPage, FeaturedPolicy, Renderer, SharedCatalog};

pub mod catalog;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;

/// Convenience functions for common operations
pub mod convenience {
    //! Entry points with default configuration, for scripts and tests that
    //! don't need fine-grained control.

    use crate::{
        Catalog, ContentRecord, FrontMatter, FsSource, GenerateReport, GeneratorConfig,
        ManifestGenerator, Pipeline, PipelineConfig, Result, Strategy,
    };
    use std::path::Path;

    /// Parse the front matter of `text`, `None` when it has no block
    pub fn parse_front_matter(text: &str) -> Result<Option<FrontMatter>> {
        crate::core::front_matter::parse(text)
    }

    /// Build the catalog of a site root, detecting the strategy
    pub fn build_catalog<P: AsRef<Path>>(root: P) -> Catalog {
        let pipeline = open(root);
        let strategy = Strategy::detect(pipeline.source(), pipeline.config());
        pipeline.run(&strategy)
    }

    /// Build the catalog by scanning the content directories directly
    pub fn scan_catalog<P: AsRef<Path>>(root: P) -> Catalog {
        let pipeline = open(root);
        pipeline.run(&pipeline.directory_strategy())
    }

    fn open<P: AsRef<Path>>(root: P) -> Pipeline<FsSource> {
        Pipeline::open(PipelineConfig {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        })
    }

    /// Write the manifest for a site root
    pub fn generate_manifest<P: AsRef<Path>>(root: P) -> Result<GenerateReport> {
        ManifestGenerator::with_config(GeneratorConfig {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        })
        .generate()
    }

    /// Look up one record of a site root by id
    pub fn find_record<P: AsRef<Path>>(root: P, id: &str) -> Option<ContentRecord> {
        build_catalog(root).by_id(id).cloned()
    }
}
