//! release-bump - bump a Cargo package version and cut a git release.
//!
//! The core is two pure pieces: [domain::Version] bumping and the
//! line-based [rewrite] of the manifest and lock file. [cli::orchestration]
//! wires them to the file system and a [git::Repository].

pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod rewrite;
pub mod ui;

pub use domain::{Version, VersionBump};
pub use error::{ReleaseError, Result};
pub use rewrite::{rewrite_lock_version, rewrite_manifest_version, LockRewrite, ManifestRewrite};
