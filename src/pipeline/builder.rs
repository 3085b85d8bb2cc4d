//! Record building
//!
//! Fetch one document, parse its front matter and project it into a
//! [`ContentRecord`]. [`RecordBuilder::build`] reports every failure as an
//! error; the aggregator decides which ones to log.

use crate::core::{ContentKind, ContentRecord, RawDocument};
use crate::error::{Result, StagexError};
use crate::io::ContentSource;

/// Builds records from documents in a [`ContentSource`]
pub struct RecordBuilder<'a> {
    source: &'a dyn ContentSource,
    extension: String,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(source: &'a dyn ContentSource, extension: impl Into<String>) -> Self {
        Self {
            source,
            extension: extension.into(),
        }
    }

    /// Logical path of a file of `kind`
    pub fn logical_path(kind: ContentKind, file_id: &str) -> String {
        format!("{}/{}", kind.directory(), file_id)
    }

    /// Fetch the raw document for `file_id`
    pub fn fetch(&self, file_id: &str, kind: ContentKind) -> Result<RawDocument> {
        let path = Self::logical_path(kind, file_id);
        let text = self.source.fetch_text(&path)?;
        Ok(RawDocument::new(path, text))
    }

    /// Build the record for `file_id`.
    ///
    /// A document without front matter fails with
    /// [`StagexError::MissingFrontMatter`].
    pub fn build(&self, file_id: &str, kind: ContentKind) -> Result<ContentRecord> {
        let raw = self.fetch(file_id, kind)?;
        let path = raw.path().to_string();
        let front_matter = raw
            .parse()?
            .into_front_matter()
            .ok_or_else(|| StagexError::missing_front_matter(&path))?;

        Ok(ContentRecord::from_front_matter(
            file_id,
            kind,
            &self.extension,
            &front_matter,
        ))
    }

}
