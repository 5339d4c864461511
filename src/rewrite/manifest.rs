use std::ops::Range;

use tracing::debug;

use super::{lines, section_header, splice, KeyPattern};
use crate::domain::{Version, VersionBump};
use crate::error::{ReleaseError, Result};

/// Section/key pair whose quoted value holds the manifest version
#[derive(Debug, Clone)]
pub struct ManifestTarget {
    section: String,
    header: String,
    key: KeyPattern,
}

/// Result of bumping the version inside a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRewrite {
    /// Full manifest text with only the version value replaced
    pub text: String,
    pub old_version: Version,
    pub new_version: Version,
    /// 1-based line number of the rewritten key
    pub line_number: usize,
}

struct Located<'a> {
    line_number: usize,
    range: Range<usize>,
    value: &'a str,
}

impl ManifestTarget {
    pub fn new(section: &str, key: &str) -> Result<Self> {
        let section = section.trim();
        if section.is_empty() {
            return Err(ReleaseError::config("Target section must not be empty"));
        }
        Ok(ManifestTarget {
            section: section.to_string(),
            header: format!("[{}]", section),
            key: KeyPattern::new(key)?,
        })
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> &str {
        self.key.key()
    }

    /// First key line inside the target section, scanning top to bottom.
    ///
    /// Any header switches the active section; only an exact `[section]`
    /// header makes the target section active again.
    fn locate<'a>(&self, text: &'a str) -> Option<Located<'a>> {
        let mut in_target = false;

        for line in lines(text) {
            if let Some(header) = section_header(line.content) {
                in_target = header == self.header;
                continue;
            }
            if !in_target {
                continue;
            }
            if let Some(range) = self.key.value_range(line.content) {
                let range = line.offset + range.start..line.offset + range.end;
                return Some(Located {
                    line_number: line.number,
                    value: &text[range.clone()],
                    range,
                });
            }
        }

        None
    }

    /// Read the target value without rewriting anything.
    pub fn find_value(&self, text: &str) -> Option<String> {
        self.locate(text).map(|located| located.value.to_string())
    }

    /// Bump the target version and splice the new value into `text`.
    ///
    /// Only the quoted value on the first matching line changes; if the
    /// section or key is missing the whole operation fails with
    /// [`ReleaseError::KeyNotFound`].
    pub fn rewrite(&self, text: &str, bump: VersionBump) -> Result<ManifestRewrite> {
        let located = self
            .locate(text)
            .ok_or_else(|| ReleaseError::key_not_found(&self.section, self.key()))?;

        let old_version = Version::parse(located.value)?;
        let new_version = old_version.bump(bump)?;

        debug!(
            line = located.line_number,
            section = %self.section,
            key = self.key(),
            old = %old_version,
            new = %new_version,
            "rewriting manifest version"
        );

        Ok(ManifestRewrite {
            text: splice(text, &[located.range], &new_version.to_string()),
            old_version,
            new_version,
            line_number: located.line_number,
        })
    }
}

impl Default for ManifestTarget {
    fn default() -> Self {
        ManifestTarget::new("package", "version").expect("default manifest target is valid")
    }
}

/// Bump `[package] version` in a Cargo-style manifest.
pub fn rewrite_manifest_version(text: &str, bump: VersionBump) -> Result<ManifestRewrite> {
    ManifestTarget::default().rewrite(text, bump)
}
