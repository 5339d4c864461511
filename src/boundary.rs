use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions hit while preparing a release.
/// These are reported to the user but never stop the release.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// No lock file next to the manifest
    LockFileMissing { path: PathBuf },
    /// Lock file exists but has no rewritable entry for the package
    LockEntryNotFound { path: PathBuf, package: String },
    /// Package name could not be determined, so the lock file was skipped
    PackageNameUnknown { manifest: PathBuf },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::LockFileMissing { path } => {
                write!(f, "Lock file '{}' not found, skipping", path.display())
            }
            ReleaseWarning::LockEntryNotFound { path, package } => {
                write!(
                    f,
                    "No entry for '{}' in '{}', lock file left unchanged and may not match the manifest",
                    package,
                    path.display()
                )
            }
            ReleaseWarning::PackageNameUnknown { manifest } => {
                write!(
                    f,
                    "Cannot determine package name from '{}', lock file not updated",
                    manifest.display()
                )
            }
        }
    }
}
