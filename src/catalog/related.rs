use crate::catalog::Catalog;
use crate::core::ContentRecord;

/// Number of related items shown on a detail page
pub const DEFAULT_RELATED_MAX: usize = 3;

/// Records sharing `record`'s category, excluding `record` itself.
///
/// Keeps catalog order and returns at most `max` entries.
pub fn related<'a>(
    record: &ContentRecord,
    catalog: &'a Catalog,
    max: usize,
) -> Vec<&'a ContentRecord> {
    catalog
        .records()
        .iter()
        .filter(|r| r.id() != record.id() && r.category == record.category)
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeaturedPolicy;
    use crate::core::ContentKind;

    fn post(id: &str, date: &str, category: &str) -> ContentRecord {
        let mut r = ContentRecord::new(id, ContentKind::Post);
        r.date = date.to_string();
        r.category = category.to_string();
        r
    }

    #[test]
    fn test_related_same_category() {
        let catalog = Catalog::new(
            vec![
                post("jan", "2025-01-01", "뮤지컬"),
                post("jun", "2025-06-01", "뮤지컬"),
                post("play", "2025-03-01", "연극"),
            ],
            vec![],
            FeaturedPolicy::Flagged,
        );
        let jun = catalog.by_id("jun").unwrap();
        let ids: Vec<_> = related(jun, &catalog, DEFAULT_RELATED_MAX)
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(ids, ["jan"]);
    }

    #[test]
    fn test_related_bounded_and_excludes_self() {
        let posts = (1..=9)
            .map(|i| post(&format!("p{}", i), &format!("2025-01-0{}", i), "콘서트"))
            .collect();
        let catalog = Catalog::new(posts, vec![], FeaturedPolicy::Flagged);

        for record in catalog.records() {
            for max in 0..5 {
                let found = related(record, &catalog, max);
                assert!(found.len() <= max);
                assert!(found.iter().all(|r| r.id() != record.id()));
            }
        }
        let p9 = catalog.by_id("p9").unwrap();
        let ids: Vec<_> = related(p9, &catalog, 3).iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["p8", "p7", "p6"]);
    }

    #[test]
    fn test_related_empty_when_alone() {
        let catalog = Catalog::new(
            vec![post("solo", "2025-01-01", "무용")],
            vec![],
            FeaturedPolicy::Flagged,
        );
        let solo = catalog.by_id("solo").unwrap();
        assert!(related(solo, &catalog, 3).is_empty());
    }
}
