//! The file manifest
//!
//! `data/files.json` lists the documents to ingest per kind, newest first:
//!
//! ```json
//! { "posts": ["2025-06-01-wicked.md"], "collections": [] }
//! ```

use crate::core::ContentKind;
use crate::error::{Result, StagexError};
use crate::io::source::ContentSource;
use serde::{Deserialize, Serialize};

/// Default logical path of the manifest
pub const DEFAULT_MANIFEST_PATH: &str = "data/files.json";

/// Ordered file names per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub posts: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
}

impl Manifest {
    /// Fetch and decode a manifest
    pub fn load(source: &dyn ContentSource, path: &str) -> Result<Self> {
        let text = source.fetch_text(path)?;
        Self::from_json(&text, path)
    }

    pub fn from_json(text: &str, path: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| StagexError::invalid_payload("manifest", path, e))
    }

    /// File names for `kind`, in ingestion order
    pub fn files(&self, kind: ContentKind) -> &[String] {
        match kind {
            ContentKind::Post => &self.posts,
            ContentKind::Collection => &self.collections,
        }
    }

    pub fn total(&self) -> usize {
        self.posts.len() + self.collections.len()
    }

    /// Pretty-printed JSON as written by the generator
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
