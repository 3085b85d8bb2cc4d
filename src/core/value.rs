//! Front matter values
//!
//! A front matter entry is either a single string or an ordered list of strings.
//! Nothing richer is produced by the line-based parser, so the type stays small.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single front matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    /// A scalar string, already trimmed and unquoted
    Scalar(String),
    /// An ordered sequence of strings parsed from `[...]` syntax
    List(Vec<String>),
}

impl FrontMatterValue {
    /// Create a scalar value
    pub fn scalar(s: impl Into<String>) -> Self {
        Self::Scalar(s.into())
    }

    /// Create a list value
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Borrow the scalar string, if this is a scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Borrow the list items, if this is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }

    /// Items of the value as a list.
    ///
    /// A scalar becomes a one-element list, an empty scalar becomes an empty list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Scalar(s) if s.is_empty() => Vec::new(),
            Self::Scalar(s) => vec![s.clone()],
        }
    }
}

impl fmt::Display for FrontMatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{}", s),
            Self::List(items) => {
                // Re-encode as JSON so the line parser reads it back unchanged
                let encoded = serde_json::to_string(items).map_err(|_| fmt::Error)?;
                write!(f, "{}", encoded)
            }
        }
    }
}

impl From<&str> for FrontMatterValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for FrontMatterValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}
