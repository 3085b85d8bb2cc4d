//! Core types: front matter parsing, documents and content records
//!
//! - [`front_matter`]: the line-based parser and the [`FrontMatter`] mapping
//! - [`value`]: scalar / list values
//! - [`document`]: raw and parsed documents
//! - [`record`]: typed [`ContentRecord`]s and their ordering
//! - [`date`]: date parsing and formatting

pub mod date;
pub mod document;
pub mod front_matter;
pub mod record;
pub mod value;

pub use document::{Document, RawDocument};
pub use front_matter::FrontMatter;
pub use record::{ContentKind, ContentRecord, COLLECTION_CATEGORY};
pub use value::FrontMatterValue;
