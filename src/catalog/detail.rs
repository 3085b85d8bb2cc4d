//! Detail pages
//!
//! Resolving an id yields either a [`Detail`] with everything a page needs
//! (record, related items, presentation fields) or an explicit not-found
//! state. The markdown body is loaded on request and handed to a
//! [`Renderer`]; HTML conversion itself lives outside this crate.

use crate::catalog::related::related;
use crate::catalog::Catalog;
use crate::core::{front_matter, ContentRecord};
use crate::error::{Result, StagexError};
use crate::io::ContentSource;
use log::error;
use serde::Serialize;

/// Shown when the requested id does not exist
pub const NOT_FOUND_MESSAGE: &str = "포스트를 찾을 수 없습니다";
/// Shown when a record has no related items
pub const NO_RELATED_MESSAGE: &str = "관련 공연이 없습니다.";
/// Shown when the body cannot be loaded
pub const CONTENT_UNAVAILABLE_MESSAGE: &str = "컨텐츠를 불러올 수 없습니다.";
/// Suffix of every page title
pub const SITE_NAME: &str = "StageX";

/// Converts a markdown body into displayable output
pub trait Renderer {
    fn render(&self, markdown: &str) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// Outcome of a detail lookup
#[derive(Debug)]
pub enum DetailPage<'a> {
    Found(Detail<'a>),
    NotFound { id: String },
}

impl<'a> DetailPage<'a> {
    pub fn resolve(catalog: &'a Catalog, id: &str, related_max: usize) -> Self {
        match catalog.by_id(id) {
            Some(record) => Self::Found(Detail {
                record,
                related: related(record, catalog, related_max),
            }),
            None => Self::NotFound { id: id.to_string() },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found detail, or a [`StagexError::RecordNotFound`]
    pub fn into_result(self) -> Result<Detail<'a>> {
        match self {
            Self::Found(detail) => Ok(detail),
            Self::NotFound { id } => Err(StagexError::record_not_found(id)),
        }
    }
}

/// Venue and period block, shown for posts only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceInfo<'a> {
    pub venue: Option<&'a str>,
    pub period: Option<&'a str>,
}

/// A resolved detail page
#[derive(Debug)]
pub struct Detail<'a> {
    pub record: &'a ContentRecord,
    pub related: Vec<&'a ContentRecord>,
}

impl<'a> Detail<'a> {
    /// `"{title} - StageX"`
    pub fn page_title(&self) -> String {
        format!("{} - {}", self.record.title, SITE_NAME)
    }

    pub fn performance_info(&self) -> Option<PerformanceInfo<'a>> {
        let record: &'a ContentRecord = self.record;
        if !record.is_post() {
            return None;
        }
        Some(PerformanceInfo {
            venue: record.venue.as_deref(),
            period: record.period.as_deref(),
        })
    }

    /// Tags formatted as `#tag`
    pub fn hashtags(&self) -> Vec<String> {
        self.record.tags.iter().map(|t| format!("#{}", t)).collect()
    }

    /// Fetch the record's document and return its body without front matter
    pub fn load_body(&self, source: &dyn ContentSource) -> Result<String> {
        let path = self
            .record
            .content_ref
            .as_deref()
            .ok_or_else(|| StagexError::transport(self.record.id(), "record has no content"))?;
        let text = source.fetch_text(path)?;
        Ok(front_matter::strip(&text).to_string())
    }

    /// Render the body, falling back to a fixed message when it cannot be loaded
    pub fn render_body(&self, source: &dyn ContentSource, renderer: &dyn Renderer) -> String {
        match self.load_body(source) {
            Ok(body) => renderer.render(&body),
            Err(e) => {
                error!("Error loading content for {}: {}", self.record.id(), e);
                CONTENT_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}
