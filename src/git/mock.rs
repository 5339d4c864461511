use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// A git operation recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Stage(Vec<PathBuf>),
    Commit(String),
    CreateTag(String),
    PushBranch { remote: String, branch: String },
    PushTag { remote: String, tag: String },
}

/// Mock repository for testing without actual git operations
///
/// Records every mutating call in order so tests can assert on the exact
/// sequence a release performs.
pub struct MockRepository {
    clean: bool,
    branch: Option<String>,
    fail_push: bool,
    tags: RefCell<Vec<String>>,
    calls: RefCell<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a clean mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            clean: true,
            branch: Some("main".to_string()),
            fail_push: false,
            tags: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Report uncommitted changes from `is_clean`
    pub fn with_dirty_tree(mut self) -> Self {
        self.clean = false;
        self
    }

    /// Check out `branch` instead of `main`
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Simulate a detached HEAD
    pub fn with_detached_head(mut self) -> Self {
        self.branch = None;
        self
    }

    /// Make every push fail with a remote error
    pub fn with_failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Pre-create an existing tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.borrow_mut().push(name.into());
        self
    }

    /// Mutating calls recorded so far, oldest first
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn current_branch(&self) -> Result<String> {
        self.branch.clone().ok_or(ReleaseError::DetachedHead)
    }

    fn stage(&self, paths: &[&Path]) -> Result<()> {
        self.record(GitCall::Stage(
            paths.iter().map(|p| p.to_path_buf()).collect(),
        ));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(GitCall::Commit(message.to_string()));
        Ok(format!("{:040x}", self.calls.borrow().len()))
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.borrow().iter().any(|t| t == name))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.tags.borrow().iter().any(|t| t == name) {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        self.tags.borrow_mut().push(name.to_string());
        self.record(GitCall::CreateTag(name.to_string()));
        Ok(())
    }

    fn push_branch(&self, remote: &str) -> Result<()> {
        let branch = self.current_branch()?;
        if self.fail_push {
            return Err(ReleaseError::remote(format!("cannot reach '{}'", remote)));
        }
        self.record(GitCall::PushBranch {
            remote: remote.to_string(),
            branch,
        });
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        if self.fail_push {
            return Err(ReleaseError::remote(format!("cannot reach '{}'", remote)));
        }
        self.record(GitCall::PushTag {
            remote: remote.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
