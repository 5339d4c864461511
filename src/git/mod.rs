//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations a
//! release needs, allowing for a real implementation backed by `git2` and a
//! mock implementation for testing.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording mock for testing
//!
//! The release workflow depends on the [Repository] trait only.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// Git operations used by the release workflow
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::ReleaseError].
pub trait Repository {
    /// Whether the working tree has no modified, staged, or untracked files
    fn is_clean(&self) -> Result<bool>;

    /// Short name of the branch HEAD points at (e.g., "main")
    ///
    /// Fails when HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// Stage files for the next commit
    ///
    /// # Arguments
    /// * `paths` - Files to stage, absolute or relative to the working directory
    fn stage(&self, paths: &[&Path]) -> Result<()>;

    /// Commit the staged changes on top of HEAD
    ///
    /// # Returns
    /// * `Ok(String)` - Hash of the new commit
    fn commit(&self, message: &str) -> Result<String>;

    /// Whether a tag named `name` already exists locally
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create a lightweight tag on HEAD
    ///
    /// Fails if a tag with that name already exists.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push the current branch to `remote`
    fn push_branch(&self, remote: &str) -> Result<()>;

    /// Push a single tag to `remote`
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
}
