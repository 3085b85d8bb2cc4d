//! Content records
//!
//! [`ContentRecord`] is the normalized form of one post or collection. The same
//! shape is produced by parsing front matter and read back from a precomputed
//! aggregate, so both sources are interchangeable downstream.

use crate::core::date::{self, cmp_newest_first};
use crate::core::front_matter::FrontMatter;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Category label given to every collection
pub const COLLECTION_CATEGORY: &str = "컬렉션";

/// Kind of content a record was built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Post,
    Collection,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Post, ContentKind::Collection];

    /// Get the short name for this kind (used in logs)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Collection => "collection",
        }
    }

    /// Directory holding documents of this kind, relative to the content root
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Post => "posts",
            Self::Collection => "collections",
        }
    }

    /// Image shown when a record has none
    pub const fn default_image(self) -> &'static str {
        match self {
            Self::Post => "images/posts/default.jpg",
            Self::Collection => "images/collections/default.jpg",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Deserialize a JSON `null` as the field's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ingested post or collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ContentKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Raw date text; see [`ContentRecord::parsed_date`]
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related_posts: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub featured: bool,
    /// Logical path of the full document, resolved by the renderer
    #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
    pub content_ref: Option<String>,
}

impl ContentRecord {
    /// Create an empty record of `kind`.
    ///
    /// Collections get their fixed category label.
    pub fn new(id: impl Into<String>, kind: ContentKind) -> Self {
        let category = match kind {
            ContentKind::Post => String::new(),
            ContentKind::Collection => COLLECTION_CATEGORY.to_string(),
        };
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            excerpt: String::new(),
            category,
            date: String::new(),
            image: None,
            venue: None,
            period: None,
            tags: Vec::new(),
            related_posts: Vec::new(),
            featured: false,
            content_ref: None,
        }
    }

    /// Project the fields recognized for `kind` out of parsed front matter.
    ///
    /// `file_id` is the file name inside the kind's directory; the record id is
    /// the file name without `.{extension}`.
    pub fn from_front_matter(
        file_id: &str,
        kind: ContentKind,
        extension: &str,
        fm: &FrontMatter,
    ) -> Self {
        let mut record = Self::new(record_id(file_id, extension), kind);
        let text = |key: &str| fm.get_str(key).unwrap_or_default().to_string();
        let optional = |key: &str| fm.get_str(key).map(str::to_string);

        record.title = text("title");
        record.excerpt = text("excerpt");
        record.date = text("date");
        record.image = optional("image").filter(|s| !s.is_empty());
        record.featured = fm.get_str("featured") == Some("true");
        record.content_ref = Some(format!("{}/{}", kind.directory(), file_id));

        match kind {
            ContentKind::Post => {
                record.category = text("category");
                record.venue = optional("venue");
                record.period = optional("period");
                record.tags = fm.get_list("tags").unwrap_or_default();
            }
            ContentKind::Collection => {
                record.related_posts = fm.get_list("related_posts").unwrap_or_default();
            }
        }
        record
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Date parsed for sorting; `None` when missing or invalid
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        date::parse_date(&self.date)
    }

    /// Date as printed on the site
    pub fn display_date(&self) -> String {
        date::format_date_ko(&self.date)
    }

    /// Image path, falling back to the kind's default image
    pub fn image_or_default(&self) -> &str {
        self.image.as_deref().unwrap_or(self.kind.default_image())
    }

    pub fn is_post(&self) -> bool {
        self.kind == ContentKind::Post
    }

    pub fn is_collection(&self) -> bool {
        self.kind == ContentKind::Collection
    }

    /// Force the kind after deserialization, resynthesizing the collection label
    pub(crate) fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        if kind == ContentKind::Collection {
            self.category = COLLECTION_CATEGORY.to_string();
        }
        self
    }
}

/// Derive a record id from a file name by removing the extension
pub fn record_id(file_id: &str, extension: &str) -> String {
    let suffix = format!(".{}", extension);
    file_id
        .strip_suffix(suffix.as_str())
        .unwrap_or(file_id)
        .to_string()
}

/// Newest first, invalid dates last
pub fn cmp_records(a: &ContentRecord, b: &ContentRecord) -> Ordering {
    cmp_newest_first(&a.date, &b.date)
}

/// Stable sort by date, newest first
pub fn sort_newest_first(records: &mut [ContentRecord]) {
    records.sort_by(cmp_records);
}
