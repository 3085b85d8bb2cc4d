//! Aggregation
//!
//! Builds every enumerated file of a kind in parallel, drops the failures and
//! sorts the survivors newest first. Results are collected in enumeration
//! order before the stable sort, so completion order never shows in the
//! output.

use crate::core::record::sort_newest_first;
use crate::core::{ContentKind, ContentRecord};
use crate::error::StagexError;
use crate::pipeline::builder::RecordBuilder;
use crate::pipeline::enumerate::Enumerator;
use log::{debug, error, info};
use rayon::prelude::*;

/// Result of one aggregation pass over a kind
#[derive(Debug, Default)]
pub struct Aggregated {
    /// Successfully built records, newest first
    pub records: Vec<ContentRecord>,
    /// Files that produced no record, with the reason
    pub failures: Vec<(String, StagexError)>,
}

pub struct Aggregator<'a> {
    builder: RecordBuilder<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(builder: RecordBuilder<'a>) -> Self {
        Self { builder }
    }

    /// Records of `kind` from the files `enumerator` lists
    pub fn aggregate(&self, kind: ContentKind, enumerator: &dyn Enumerator) -> Vec<ContentRecord> {
        self.aggregate_files(kind, &enumerator.enumerate(kind)).records
    }

    /// Build `files` and keep both the records and the per-file failures
    pub fn aggregate_files(&self, kind: ContentKind, files: &[String]) -> Aggregated {
        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file, self.builder.build(file, kind)))
            .collect();

        let mut aggregated = Aggregated::default();
        for (file, result) in results {
            match result {
                Ok(record) => aggregated.records.push(record),
                Err(e) => {
                    match &e {
                        StagexError::MissingFrontMatter { path } => {
                            debug!("Skipping {}: no front matter", path)
                        }
                        _ => error!("Error loading {}: {}", file, e),
                    }
                    aggregated.failures.push((file.clone(), e));
                }
            }
        }
        sort_newest_first(&mut aggregated.records);

        info!(
            "Aggregated {} {} record(s), skipped {}",
            aggregated.records.len(),
            kind,
            aggregated.failures.len()
        );
        aggregated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{Manifest, MemorySource};
    use crate::pipeline::enumerate::ManifestEnumerator;
    use pretty_assertions::assert_eq;

    fn post(date: &str) -> String {
        format!("---\ntitle: t\ndate: {}\ncategory: 뮤지컬\n---\n", date)
    }

    fn ids(records: &[ContentRecord]) -> Vec<&str> {
        records.iter().map(ContentRecord::id).collect()
    }

    #[test]
    fn test_sorted_regardless_of_enumeration_order() {
        let source = MemorySource::new()
            .with_file("posts/a.md", post("2025-01-01"))
            .with_file("posts/b.md", post("2025-06-01"))
            .with_file("posts/c.md", post("2024-03-15"))
            .with_file("posts/d.md", post("not a date"));
        let aggregator = Aggregator::new(RecordBuilder::new(&source, "md"));

        let orders: [[&str; 4]; 3] = [
            ["a.md", "b.md", "c.md", "d.md"],
            ["d.md", "c.md", "b.md", "a.md"],
            ["c.md", "d.md", "a.md", "b.md"],
        ];
        for order in orders {
            let files: Vec<String> = order.iter().map(|s| s.to_string()).collect();
            let aggregated = aggregator.aggregate_files(ContentKind::Post, &files);
            assert_eq!(ids(&aggregated.records), ["b", "a", "c", "d"]);
        }
    }

    #[test]
    fn test_failures_do_not_abort_siblings() {
        let source = MemorySource::new()
            .with_file("posts/good.md", post("2025-01-01"))
            .with_file("posts/bad.md", "---\ntags: [a, b\n---\n")
            .with_file("posts/plain.md", "no front matter");
        let aggregator = Aggregator::new(RecordBuilder::new(&source, "md"));

        let files: Vec<String> = ["bad.md", "good.md", "plain.md", "missing.md"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let aggregated = aggregator.aggregate_files(ContentKind::Post, &files);

        assert_eq!(ids(&aggregated.records), ["good"]);
        let failed: Vec<&str> = aggregated.failures.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(failed, ["bad.md", "plain.md", "missing.md"]);
        assert!(matches!(aggregated.failures[0].1, StagexError::MalformedArray { .. }));
    }

    #[test]
    fn test_failed_enumeration_yields_empty() {
        let source = MemorySource::new();
        let aggregator = Aggregator::new(RecordBuilder::new(&source, "md"));
        let enumerator = ManifestEnumerator::load(&source, "data/files.json");
        assert!(aggregator.aggregate(ContentKind::Post, &enumerator).is_empty());
    }

    #[test]
    fn test_aggregate_via_enumerator() {
        let source = MemorySource::new().with_file("collections/c.md", post("2025-01-01"));
        let aggregator = Aggregator::new(RecordBuilder::new(&source, "md"));
        let enumerator = ManifestEnumerator::from_manifest(Manifest {
            posts: vec![],
            collections: vec!["c.md".into()],
        });
        let records = aggregator.aggregate(ContentKind::Collection, &enumerator);
        assert_eq!(ids(&records), ["c"]);
        assert!(records[0].is_collection());
    }
}
