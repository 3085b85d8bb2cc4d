//! Raw and parsed content documents
//!
//! A [`RawDocument`] is the fetched text of one content file. Parsing it yields a
//! [`Document`]: the optional front matter plus the body that remains after the
//! block is removed, which is what the markdown renderer receives.

use crate::core::front_matter::{self, FrontMatter};
use crate::error::Result;

/// Unparsed text of one content file and its logical path
#[derive(Debug, Clone)]
pub struct RawDocument {
    path: String,
    text: String,
}

impl RawDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Logical path the text was fetched from
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse into a [`Document`], consuming the raw text
    pub fn parse(self) -> Result<Document> {
        Document::parse(&self.text)
    }
}

/// A content document split into front matter and body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    front_matter: Option<FrontMatter>,
    body: String,
}

impl Document {
    /// Create a new document with optional front matter and body
    pub fn new(front_matter: Option<FrontMatter>, body: String) -> Self {
        Self { front_matter, body }
    }

    /// Create a document with only body content (no front matter)
    pub fn body_only(body: String) -> Self {
        Self::new(None, body)
    }

    /// Parse a document from its full text.
    ///
    /// Without a terminated block the whole text is the body.
    pub fn parse(text: &str) -> Result<Self> {
        match front_matter::split(text) {
            Some((block, body)) => {
                let fm = front_matter::parse_block(block)?;
                Ok(Self::new(Some(fm), body.to_string()))
            }
            None => Ok(Self::body_only(text.to_string())),
        }
    }

    /// Get the front matter as a reference
    pub fn front_matter(&self) -> Option<&FrontMatter> {
        self.front_matter.as_ref()
    }

    /// Take the front matter out of the document
    pub fn into_front_matter(self) -> Option<FrontMatter> {
        self.front_matter
    }

    /// Get the body content
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Check if the document carried a front matter block, even an empty one
    pub fn has_front_matter(&self) -> bool {
        self.front_matter.is_some()
    }
}
