//! Domain logic - pure release rules independent of files and git

pub mod tag;
pub mod version;

pub use tag::TagPattern;
pub use version::{bump_version, Version, VersionBump};
