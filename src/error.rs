use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version format: {0}")]
    Format(String),

    #[error("Configuration error: target key not found ([{section}] {key})")]
    KeyNotFound { section: String, key: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Working tree is not clean. Commit or stash changes before releasing.")]
    DirtyWorkingTree,

    #[error("HEAD is detached. Check out a branch before releasing.")]
    DetachedHead,

    #[error("Tag '{0}' already exists. Delete it or pick another bump before releasing.")]
    TagExists(String),

    #[error("Bump kind error: {0}")]
    BumpKind(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseError::Format(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a "target key not found" error for a section/key pair
    pub fn key_not_found(section: impl Into<String>, key: impl Into<String>) -> Self {
        ReleaseError::KeyNotFound {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Create a bump kind selection error
    pub fn bump_kind(msg: impl Into<String>) -> Self {
        ReleaseError::BumpKind(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }
}
