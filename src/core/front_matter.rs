//! Line-based front matter parser
//!
//! A document carries metadata when it starts with a `---` line, followed by
//! `key: value` lines and a closing `---` line. Values are plain strings with one
//! pair of matching quotes removed, or `[...]` lists of strings.
//!
//! ```text
//! ---
//! title: "레미제라블"
//! date: 2025-06-01
//! tags: ["뮤지컬", "서울"]
//! ---
//! body...
//! ```

use crate::core::value::FrontMatterValue;
use crate::error::{Result, StagexError};
use regex::Regex;
use std::sync::OnceLock;

/// Delimiter line opening and closing the block
pub const DELIMITER: &str = "---";

fn block_regex() -> &'static Regex {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    BLOCK.get_or_init(|| {
        // The inner group is optional so that `---\n---` yields an empty block.
        Regex::new(r"\A---[ \t]*\r?\n(?s:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("front matter regex is valid")
    })
}

/// Split a document into its raw front matter block and body.
///
/// Returns `None` when the text does not start with a terminated block.
pub fn split(text: &str) -> Option<(&str, &str)> {
    let captures = block_regex().captures(text)?;
    let whole = captures.get(0)?;
    let block = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    Some((block, &text[whole.end()..]))
}

/// Remove the leading front matter block, returning the body unchanged otherwise.
pub fn strip(text: &str) -> &str {
    split(text).map(|(_, body)| body).unwrap_or(text)
}

/// Parse the front matter of a document.
///
/// `Ok(None)` means the document has no (terminated) block. A malformed list
/// value fails the whole parse.
pub fn parse(text: &str) -> Result<Option<FrontMatter>> {
    match split(text) {
        Some((block, _)) => parse_block(block).map(Some),
        None => Ok(None),
    }
}

/// Parse the lines between the delimiters
pub fn parse_block(block: &str) -> Result<FrontMatter> {
    let mut front_matter = FrontMatter::new();

    for line in block.lines() {
        let Some((key, raw)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = parse_value(key, raw)?;
        front_matter.insert(key, value);
    }

    Ok(front_matter)
}

fn parse_value(key: &str, raw: &str) -> Result<FrontMatterValue> {
    let trimmed = raw.trim();
    let (value, quoted) = match strip_matching_quotes(trimmed) {
        Some(inner) => (inner, true),
        None => (trimmed, false),
    };

    if value.starts_with('[') && value.ends_with(']') && value.len() >= 2 {
        return parse_list(key, value).map(FrontMatterValue::List);
    }
    // `[a, b` is a list missing its bracket; `[공지] title` is a scalar.
    if !quoted && value.starts_with('[') && !value.contains(']') {
        return Err(StagexError::malformed_array(key, "missing closing ']'"));
    }

    Ok(FrontMatterValue::Scalar(value.to_string()))
}

fn strip_matching_quotes(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
    })
}

fn parse_list(key: &str, value: &str) -> Result<Vec<String>> {
    let inner = &value[1..value.len() - 1];
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut rest = inner;
    loop {
        rest = rest.trim_start();
        let (item, remainder) = match rest.chars().next() {
            Some('"') => take_double_quoted(key, rest)?,
            Some('\'') => take_single_quoted(key, rest)?,
            Some(c @ ('[' | ']' | ',')) => {
                return Err(StagexError::malformed_array(
                    key,
                    format!("unexpected '{}'", c),
                ))
            }
            Some(_) => take_bare(key, rest)?,
            None => {
                return Err(StagexError::malformed_array(
                    key,
                    "expected an item after ','",
                ))
            }
        };
        items.push(item);

        let remainder = remainder.trim_start();
        match remainder.strip_prefix(',') {
            Some(next) => rest = next,
            None if remainder.is_empty() => break,
            None => {
                return Err(StagexError::malformed_array(
                    key,
                    format!("expected ',' before '{}'", remainder),
                ))
            }
        }
    }

    Ok(items)
}

/// Read a JSON string literal from the start of `s`
fn take_double_quoted<'a>(key: &str, s: &'a str) -> Result<(String, &'a str)> {
    let mut escaped = false;
    for (idx, c) in s.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                let item: String = serde_json::from_str(&s[..=idx])
                    .map_err(|e| StagexError::malformed_array(key, e.to_string()))?;
                return Ok((item, &s[idx + 1..]));
            }
            _ => {}
        }
    }
    Err(StagexError::malformed_array(key, "unterminated string"))
}

fn take_single_quoted<'a>(key: &str, s: &'a str) -> Result<(String, &'a str)> {
    let end = s[1..]
        .find('\'')
        .map(|pos| pos + 1)
        .ok_or_else(|| StagexError::malformed_array(key, "unterminated string"))?;
    Ok((s[1..end].to_string(), &s[end + 1..]))
}

fn take_bare<'a>(key: &str, s: &'a str) -> Result<(String, &'a str)> {
    let end = s.find(',').unwrap_or(s.len());
    let token = s[..end].trim_end();
    if token.contains(['"', '\'', '[', ']']) {
        return Err(StagexError::malformed_array(
            key,
            format!("invalid item '{}'", token),
        ));
    }
    Ok((token.to_string(), &s[end..]))
}

/// Parsed front matter: string keys in first-seen order.
///
/// Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, FrontMatterValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, overwriting an earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Scalar value for `key`, if present and scalar
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontMatterValue::as_str)
    }

    /// Value for `key` coerced to a list
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(FrontMatterValue::to_list)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontMatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the block back to text, delimiters included.
    ///
    /// Scalars are double-quoted and lists are written as JSON arrays, so
    /// [`parse`] recovers the same keys and values.
    pub fn to_block(&self) -> String {
        let mut out = String::from(DELIMITER);
        out.push('\n');
        for (key, value) in &self.entries {
            match value {
                FrontMatterValue::Scalar(s) => out.push_str(&format!("{}: \"{}\"\n", key, s)),
                FrontMatterValue::List(_) => out.push_str(&format!("{}: {}\n", key, value)),
            }
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}
