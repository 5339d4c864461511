use tracing::debug;

use super::{lines, splice, KeyPattern};
use crate::error::{ReleaseError, Result};

/// Outcome of a best-effort lock file rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockRewrite {
    /// At least one entry was updated; holds the full new text
    Rewritten(String),
    /// No matching entry with a version line was found
    Unchanged,
}

impl LockRewrite {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, LockRewrite::Rewritten(_))
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            LockRewrite::Rewritten(text) => Some(text),
            LockRewrite::Unchanged => None,
        }
    }
}

/// Shape of a repeated-block lock file such as `Cargo.lock`
#[derive(Debug, Clone)]
pub struct LockLayout {
    block_marker: String,
    name: KeyPattern,
    version: KeyPattern,
}

impl LockLayout {
    pub fn new(block_marker: &str, name_key: &str, version_key: &str) -> Result<Self> {
        let block_marker = block_marker.trim();
        if block_marker.is_empty() {
            return Err(ReleaseError::config("Lock block marker must not be empty"));
        }
        Ok(LockLayout {
            block_marker: block_marker.to_string(),
            name: KeyPattern::new(name_key)?,
            version: KeyPattern::new(version_key)?,
        })
    }

    pub fn block_marker(&self) -> &str {
        &self.block_marker
    }

    /// Point the entry for `package_name` at `new_version`.
    ///
    /// Each block marker starts a fresh entry. The first name line in a
    /// block decides whether the block belongs to the package; once it does,
    /// the first following version line is rewritten and the block is closed,
    /// so at most one line per block changes.
    pub fn rewrite(&self, text: &str, package_name: &str, new_version: &str) -> LockRewrite {
        let mut in_block = false;
        let mut name_seen = false;
        let mut name_matches = false;
        let mut edits = Vec::new();

        for line in lines(text) {
            if line.content.trim() == self.block_marker {
                in_block = true;
                name_seen = false;
                name_matches = false;
                continue;
            }
            if !in_block {
                continue;
            }

            if !name_seen {
                if let Some(range) = self.name.value_range(line.content) {
                    name_seen = true;
                    name_matches = &line.content[range] == package_name;
                    continue;
                }
            }

            if name_matches {
                if let Some(range) = self.version.value_range(line.content) {
                    debug!(
                        line = line.number,
                        package = package_name,
                        old = &line.content[range.clone()],
                        new = new_version,
                        "rewriting lock entry"
                    );
                    edits.push(line.offset + range.start..line.offset + range.end);
                    name_matches = false;
                    in_block = false;
                }
            }
        }

        if edits.is_empty() {
            debug!(package = package_name, "no lock entry rewritten");
            return LockRewrite::Unchanged;
        }

        LockRewrite::Rewritten(splice(text, &edits, new_version))
    }
}

impl Default for LockLayout {
    fn default() -> Self {
        LockLayout::new("[[package]]", "name", "version").expect("default lock layout is valid")
    }
}

/// Rewrite the `[[package]]` entry for `package_name` in a Cargo-style lock file.
///
/// Empty text and missing entries both yield [`LockRewrite::Unchanged`].
pub fn rewrite_lock_version(text: &str, package_name: &str, new_version: &str) -> LockRewrite {
    LockLayout::default().rewrite(text, package_name, new_version)
}
