//! Line-based rewriting of `[section]` / `key = "value"` text files
//!
//! Both rewriters are small state scans over lines rather than a TOML
//! parser: they locate the first matching `key = "value"` line and splice a
//! new value into exactly that byte range, so every other byte of the file
//! (comments, ordering, whitespace, line endings) comes out untouched.
//!
//! - [manifest]: bump the `[package]` `version` of a manifest
//! - [lock]: point the package's own lock-file entry at the new version

pub mod lock;
pub mod manifest;

pub use lock::{rewrite_lock_version, LockLayout, LockRewrite};
pub use manifest::{rewrite_manifest_version, ManifestRewrite, ManifestTarget};

use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::ops::Range;

/// A single line of text without its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the first character within the whole text
    pub offset: usize,
    /// Line content with any trailing `\n` or `\r\n` removed
    pub content: &'a str,
}

/// Iterate over the lines of `text`, keeping track of byte offsets.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let start = offset;
            offset += raw.len();
            let content = match raw.strip_suffix('\n') {
                Some(line) => line.strip_suffix('\r').unwrap_or(line),
                None => raw,
            };
            Line {
                number: index + 1,
                offset: start,
                content,
            }
        })
}

/// Returns the trimmed header (e.g. `[package]`) if `line` is a section header.
///
/// Only lines whose trimmed form both starts with `[` and ends with `]` count.
pub(crate) fn section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        Some(trimmed)
    } else {
        None
    }
}

/// Replace each byte range of `text` with `replacement`.
///
/// Ranges must be sorted and must not overlap.
pub(crate) fn splice(text: &str, ranges: &[Range<usize>], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * replacement.len());
    let mut last = 0;
    for range in ranges {
        out.push_str(&text[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Matcher for a `key = "value"` line starting at column zero
#[derive(Debug, Clone)]
pub struct KeyPattern {
    key: String,
    regex: Regex,
}

impl KeyPattern {
    pub fn new(key: &str) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(ReleaseError::config("Key name must not be empty"));
        }
        let regex = Regex::new(&format!(r#"^{}\s*=\s*"([^"]+)""#, regex::escape(key)))
            .map_err(|e| ReleaseError::config(format!("Invalid key '{}': {}", key, e)))?;
        Ok(KeyPattern {
            key: key.to_string(),
            regex,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Byte range of the quoted value within `line`, if the line assigns this key.
    pub fn value_range(&self, line: &str) -> Option<Range<usize>> {
        self.regex
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|value| value.range())
    }
}
