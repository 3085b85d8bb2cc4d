//! The catalog: every ingested record in one queryable store
//!
//! Posts and collections are merged into a single list sorted newest first
//! (ties keep ingestion order, posts before collections). All views are slices
//! or filters of that list.

pub mod detail;
pub mod related;
pub mod shared;

pub use detail::{Detail, DetailPage, Renderer};
pub use related::{related, DEFAULT_RELATED_MAX};
pub use shared::SharedCatalog;

use crate::core::record::sort_newest_first;
use crate::core::{ContentKind, ContentRecord};
use log::warn;
use std::collections::HashSet;
use std::fmt;

/// How the "featured" view picks its records.
///
/// The two data sources historically disagree on this, so both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedPolicy {
    /// Records whose front matter or aggregate entry sets `featured`
    Flagged,
    /// The most recent collections
    RecentCollections,
}

impl fmt::Display for FeaturedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flagged => write!(f, "flagged"),
            Self::RecentCollections => write!(f, "recent-collections"),
        }
    }
}

/// Merged, read-only view over posts and collections
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ContentRecord>,
    policy: FeaturedPolicy,
}

impl Catalog {
    /// Merge aggregated posts and collections
    pub fn new(
        posts: Vec<ContentRecord>,
        collections: Vec<ContentRecord>,
        policy: FeaturedPolicy,
    ) -> Self {
        let mut records = posts;
        records.extend(collections);
        sort_newest_first(&mut records);

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                warn!(
                    "Duplicate id '{}': lookups resolve to the newest record",
                    record.id()
                );
            }
        }

        Self { records, policy }
    }

    pub fn empty(policy: FeaturedPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Every record, newest first
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn policy(&self) -> FeaturedPolicy {
        self.policy
    }

    pub fn by_id(&self, id: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn by_kind(&self, kind: ContentKind) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn posts(&self) -> impl Iterator<Item = &ContentRecord> {
        self.by_kind(ContentKind::Post)
    }

    pub fn collections(&self) -> impl Iterator<Item = &ContentRecord> {
        self.by_kind(ContentKind::Collection)
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a ContentRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }

    /// First `n` featured records under the catalog's own policy
    pub fn featured(&self, n: usize) -> Vec<&ContentRecord> {
        self.featured_with(self.policy, n)
    }

    /// First `n` featured records under an explicit policy
    pub fn featured_with(&self, policy: FeaturedPolicy, n: usize) -> Vec<&ContentRecord> {
        match policy {
            FeaturedPolicy::Flagged => self.records.iter().filter(|r| r.featured).take(n).collect(),
            FeaturedPolicy::RecentCollections => self.collections().take(n).collect(),
        }
    }

    /// First `n` posts; may overlap with [`Catalog::featured`]
    pub fn grid(&self, n: usize) -> Vec<&ContentRecord> {
        self.posts().take(n).collect()
    }

    /// Case-insensitive substring search over title and excerpt.
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&ContentRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.excerpt.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Records a collection lists in `related_posts`, skipping unknown ids
    pub fn collection_members(&self, collection: &ContentRecord) -> Vec<&ContentRecord> {
        collection
            .related_posts
            .iter()
            .filter_map(|id| self.by_id(id))
            .collect()
    }

    /// Resolve the detail page for `id`
    pub fn detail(&self, id: &str, related_max: usize) -> DetailPage<'_> {
        DetailPage::resolve(self, id, related_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::COLLECTION_CATEGORY;
    use pretty_assertions::assert_eq;

    fn post(id: &str, date: &str, category: &str) -> ContentRecord {
        let mut r = ContentRecord::new(id, ContentKind::Post);
        r.date = date.to_string();
        r.category = category.to_string();
        r.title = format!("Title {}", id);
        r
    }

    fn collection(id: &str, date: &str) -> ContentRecord {
        let mut r = ContentRecord::new(id, ContentKind::Collection);
        r.date = date.to_string();
        r
    }

    fn ids(records: &[&ContentRecord]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    fn sample() -> Catalog {
        let mut flagged = post("p3", "2025-03-01", "연극");
        flagged.featured = true;
        Catalog::new(
            vec![
                post("p1", "2025-01-01", "뮤지컬"),
                post("p2", "2025-06-01", "뮤지컬"),
                flagged,
            ],
            vec![collection("c1", "2025-02-01"), collection("c2", "2025-07-01")],
            FeaturedPolicy::RecentCollections,
        )
    }

    #[test]
    fn test_merged_order() {
        let catalog = sample();
        let all: Vec<_> = catalog.records().iter().collect();
        assert_eq!(ids(&all), ["c2", "p2", "p3", "c1", "p1"]);
    }

    #[test]
    fn test_ties_keep_ingestion_order() {
        let catalog = Catalog::new(
            vec![post("p", "2025-01-01", "x")],
            vec![collection("c", "2025-01-01")],
            FeaturedPolicy::Flagged,
        );
        let all: Vec<_> = catalog.records().iter().collect();
        assert_eq!(ids(&all), ["p", "c"]);
    }

    #[test]
    fn test_by_id() {
        let catalog = sample();
        assert_eq!(catalog.by_id("c1").unwrap().category, COLLECTION_CATEGORY);
        assert!(catalog.by_id("missing-id").is_none());
    }

    #[test]
    fn test_featured_policies_differ() {
        let catalog = sample();
        assert_eq!(ids(&catalog.featured(3)), ["c2", "c1"]);
        assert_eq!(ids(&catalog.featured_with(FeaturedPolicy::Flagged, 3)), ["p3"]);
        assert_eq!(ids(&catalog.featured(1)), ["c2"]);
    }

    #[test]
    fn test_grid_is_posts_only() {
        let catalog = sample();
        assert_eq!(ids(&catalog.grid(8)), ["p2", "p3", "p1"]);
        assert_eq!(ids(&catalog.grid(2)), ["p2", "p3"]);
        assert!(catalog.grid(0).is_empty());
    }

    #[test]
    fn test_search() {
        let mut catalog_posts = vec![post("a", "2025-01-01", "x"), post("b", "2025-02-01", "x")];
        catalog_posts[0].title = "Phantom of the OPERA".to_string();
        catalog_posts[1].excerpt = "오페라의 유령 in Seoul".to_string();
        let catalog = Catalog::new(catalog_posts, vec![], FeaturedPolicy::Flagged);

        assert_eq!(ids(&catalog.search("opera")), ["a"]);
        assert_eq!(ids(&catalog.search("SEOUL")), ["b"]);
        assert_eq!(ids(&catalog.search("유령")), ["b"]);
        assert_eq!(catalog.search("").len(), 2);
        assert!(catalog.search("nothing").is_empty());
    }

    #[test]
    fn test_by_category() {
        let catalog = sample();
        let musicals: Vec<_> = catalog.by_category("뮤지컬").collect();
        assert_eq!(ids(&musicals), ["p2", "p1"]);
        assert_eq!(catalog.by_category(COLLECTION_CATEGORY).count(), 2);
    }

    #[test]
    fn test_collection_members() {
        let mut c = collection("c", "2025-01-01");
        c.related_posts = vec!["p2".into(), "ghost".into(), "p1".into()];
        let catalog = Catalog::new(
            vec![post("p1", "2025-01-01", "x"), post("p2", "2025-02-01", "x")],
            vec![c.clone()],
            FeaturedPolicy::RecentCollections,
        );
        assert_eq!(ids(&catalog.collection_members(&c)), ["p2", "p1"]);
    }
}
