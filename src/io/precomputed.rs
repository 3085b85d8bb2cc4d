//! Precomputed aggregates
//!
//! `data/posts.json` carries records that were already built, so no
//! enumeration or front matter parsing is needed. When it cannot be loaded the
//! site falls back to [`PrecomputedAggregate::builtin`].

use crate::core::record::{null_as_default, sort_newest_first, ContentKind, ContentRecord};
use crate::error::{Result, StagexError};
use crate::io::source::ContentSource;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default logical path of the precomputed aggregate
pub const DEFAULT_AGGREGATE_PATH: &str = "data/posts.json";

/// Records grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecomputedAggregate {
    #[serde(default)]
    pub posts: Vec<ContentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<ContentRecord>,
}

impl PrecomputedAggregate {
    /// Fetch and decode an aggregate
    pub fn load(source: &dyn ContentSource, path: &str) -> Result<Self> {
        let text = source.fetch_text(path)?;
        Self::from_json(&text, path)
    }

    /// Decode an aggregate, skipping entries that are not valid records.
    ///
    /// Only a payload that is not an object of entry lists is an error.
    pub fn from_json(text: &str, path: &str) -> Result<Self> {
        let raw: RawAggregate = serde_json::from_str(text)
            .map_err(|e| StagexError::invalid_payload("precomputed aggregate", path, e))?;
        Ok(Self {
            posts: decode_entries(raw.posts, ContentKind::Post, path),
            collections: decode_entries(raw.collections, ContentKind::Collection, path),
        })
    }

    /// Static records shown when no aggregate can be loaded
    pub fn builtin() -> Self {
        let mut post = ContentRecord::new("welcome", ContentKind::Post);
        post.title = "StageX에 오신 것을 환영합니다".to_string();
        post.excerpt = "공연 소식을 준비하고 있습니다".to_string();
        post.category = "공연".to_string();
        post.date = "2025-01-01".to_string();
        post.featured = true;

        Self {
            posts: vec![post],
            collections: Vec::new(),
        }
    }

    /// Records of `kind`, kind fields normalized and sorted newest first
    pub fn records(&self, kind: ContentKind) -> Vec<ContentRecord> {
        let source = match kind {
            ContentKind::Post => &self.posts,
            ContentKind::Collection => &self.collections,
        };
        let mut records: Vec<_> = source.iter().cloned().map(|r| r.with_kind(kind)).collect();
        sort_newest_first(&mut records);
        records
    }
}

/// Entry lists kept undecoded so one bad entry cannot reject the rest
#[derive(Deserialize)]
struct RawAggregate {
    #[serde(default, deserialize_with = "null_as_default")]
    posts: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    collections: Vec<Value>,
}

fn decode_entries(entries: Vec<Value>, kind: ContentKind, path: &str) -> Vec<ContentRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping {} entry {} in {}: {}", kind, idx, path, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::COLLECTION_CATEGORY;
    use crate::io::source::MemorySource;

    #[test]
    fn test_load_posts_only() {
        let source = MemorySource::new().with_file(
            DEFAULT_AGGREGATE_PATH,
            r#"{"posts": [
                {"id": "old", "title": "A", "date": "2024-01-01", "category": "연극"},
                {"id": "new", "title": "B", "date": "2025-01-01", "category": "연극", "featured": true}
            ]}"#,
        );
        let aggregate = PrecomputedAggregate::load(&source, DEFAULT_AGGREGATE_PATH).unwrap();
        let posts = aggregate.records(ContentKind::Post);
        assert_eq!(posts[0].id(), "new");
        assert_eq!(posts[1].id(), "old");
        assert!(aggregate.records(ContentKind::Collection).is_empty());
    }

    #[test]
    fn test_collections_get_kind_and_label() {
        let aggregate = PrecomputedAggregate::from_json(
            r#"{"posts": [], "collections": [{"id": "c1", "title": "여름", "category": "x"}]}"#,
            "agg.json",
        )
        .unwrap();
        let collections = aggregate.records(ContentKind::Collection);
        assert_eq!(collections[0].kind, ContentKind::Collection);
        assert_eq!(collections[0].category, COLLECTION_CATEGORY);
    }

    #[test]
    fn test_bad_entries_are_skipped_individually() {
        let aggregate = PrecomputedAggregate::from_json(
            r#"{"posts": [
                {"id": "a", "title": "A", "date": "2025-01-01", "featured": true},
                {"id": "b", "title": "B", "date": null, "tags": null},
                {"title": "no id"},
                {"id": "c", "tags": "not a list"}
            ], "collections": null}"#,
            "agg.json",
        )
        .unwrap();

        let ids: Vec<_> = aggregate
            .records(ContentKind::Post)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(aggregate.collections.is_empty());
    }

    #[test]
    fn test_invalid_aggregate() {
        let err = PrecomputedAggregate::from_json("[1, 2]", "agg.json").unwrap_err();
        assert!(matches!(err, StagexError::InvalidPayload { .. }));
    }

    #[test]
    fn test_builtin_is_never_empty() {
        let builtin = PrecomputedAggregate::builtin();
        assert!(!builtin.posts.is_empty());
        assert!(builtin.posts.iter().any(|r| r.featured));
    }
}
