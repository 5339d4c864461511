//! Main release workflow orchestration logic
//!
//! Separates the release steps from CLI argument parsing so the workflow
//! can be driven programmatically (and against a mock repository).
//!
//! The workflow runs in two phases. [prepare_release] reads and rewrites
//! everything in memory; a fatal error there leaves the working tree
//! untouched. [apply_release] then writes the files and performs the git
//! steps, stopping at the first failure.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::boundary::ReleaseWarning;
use crate::config::Config;
use crate::domain::{Version, VersionBump};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::rewrite::{LockRewrite, ManifestTarget};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args after environment fallbacks have been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Project root; manifest and lock paths are relative to it
    pub root: PathBuf,

    pub bump: VersionBump,

    /// Preview mode - don't write files or touch git
    pub dry_run: bool,

    /// Push the branch and tag after tagging
    pub push: bool,
}

/// Everything a release will do, computed without side effects
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub old_version: Version,
    pub new_version: Version,
    pub tag: String,
    pub commit_message: String,
    pub manifest_path: PathBuf,
    pub manifest_text: String,
    pub lock_path: PathBuf,
    pub lock_exists: bool,
    /// New lock text, present only when an entry was rewritten
    pub lock_text: Option<String>,
    pub remote: String,
    pub push: bool,
    pub warnings: Vec<ReleaseWarning>,
}

impl ReleasePlan {
    /// Files added to the release commit
    pub fn staged_paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.manifest_path.as_path()];
        if self.lock_exists {
            paths.push(self.lock_path.as_path());
        }
        paths
    }

    /// Human-readable list of the actions [apply_release] performs
    pub fn steps(&self) -> Vec<String> {
        let mut steps = vec![
            format!("bump: {} -> {}", self.old_version, self.new_version),
            format!("update {}", self.manifest_path.display()),
        ];
        if self.lock_text.is_some() {
            steps.push(format!("update {}", self.lock_path.display()));
        }

        let staged: Vec<String> = self
            .staged_paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        steps.push(format!("git add {}", staged.join(" ")));
        steps.push(format!("git commit -m \"{}\"", self.commit_message));
        steps.push(format!("git tag {}", self.tag));
        if self.push {
            steps.push(format!("git push {} HEAD", self.remote));
            steps.push(format!("git push {} {}", self.remote, self.tag));
        }
        steps
    }
}

/// Result of a release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub old_version: Version,
    pub new_version: Version,

    /// The tag that was (or would be) created
    pub tag: String,

    /// Hash of the release commit; `None` for a dry run
    pub commit: Option<String>,

    /// Whether the branch and tag were pushed to remote
    pub pushed: bool,

    pub dry_run: bool,

    /// Planned steps, as printed for a dry run
    pub steps: Vec<String>,

    pub warnings: Vec<ReleaseWarning>,
}

/// Compute the release without writing anything.
///
/// Fails fast on a dirty working tree, a missing or unparsable manifest
/// version, or a tag that already exists. Lock file problems only produce
/// warnings.
pub fn prepare_release<R: Repository>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
) -> Result<ReleasePlan> {
    if !repo.is_clean()? {
        return Err(ReleaseError::DirtyWorkingTree);
    }

    let target = config.manifest_target()?;
    let layout = config.lock_layout()?;
    let tag_pattern = config.tag_pattern()?;
    let commit_pattern = config.commit_pattern()?;

    let manifest_path = args.root.join(&config.manifest);
    let lock_path = args.root.join(&config.lock_file);

    let manifest = fs::read_to_string(&manifest_path)?;
    let rewrite = target.rewrite(&manifest, args.bump)?;
    info!(
        manifest = %manifest_path.display(),
        old = %rewrite.old_version,
        new = %rewrite.new_version,
        "bumped manifest version"
    );

    let tag = tag_pattern.format(&rewrite.new_version);
    if repo.tag_exists(&tag)? {
        return Err(ReleaseError::TagExists(tag));
    }

    let mut warnings = Vec::new();
    let lock_exists = lock_path.exists();
    let new_version = rewrite.new_version.to_string();

    let lock_text = if !lock_exists {
        warnings.push(ReleaseWarning::LockFileMissing {
            path: lock_path.clone(),
        });
        None
    } else {
        match package_name(config, &rewrite.text)? {
            None => {
                warnings.push(ReleaseWarning::PackageNameUnknown {
                    manifest: manifest_path.clone(),
                });
                None
            }
            Some(package) => {
                let lock = fs::read_to_string(&lock_path)?;
                match layout.rewrite(&lock, &package, &new_version) {
                    LockRewrite::Rewritten(text) => Some(text),
                    LockRewrite::Unchanged => {
                        warnings.push(ReleaseWarning::LockEntryNotFound {
                            path: lock_path.clone(),
                            package,
                        });
                        None
                    }
                }
            }
        }
    };

    // Shown to the user by the caller; only traced here.
    for warning in &warnings {
        info!(%warning, "release warning");
    }

    Ok(ReleasePlan {
        tag,
        commit_message: commit_pattern.format(&rewrite.new_version),
        old_version: rewrite.old_version,
        new_version: rewrite.new_version,
        manifest_path,
        manifest_text: rewrite.text,
        lock_path,
        lock_exists,
        lock_text,
        remote: config.remote.clone(),
        push: args.push,
        warnings,
    })
}

/// Package name used to find the lock entry: configured, else read from the manifest.
fn package_name(config: &Config, manifest: &str) -> Result<Option<String>> {
    if let Some(name) = &config.package_name {
        return Ok(Some(name.clone()));
    }
    let name_target = ManifestTarget::new(&config.target.section, "name")?;
    Ok(name_target.find_value(manifest))
}

/// Write the planned files, then commit, tag and optionally push.
pub fn apply_release<R: Repository>(plan: ReleasePlan, repo: &R) -> Result<WorkflowResult> {
    let steps = plan.steps();

    fs::write(&plan.manifest_path, &plan.manifest_text)?;
    if let Some(lock) = &plan.lock_text {
        fs::write(&plan.lock_path, lock)?;
    }

    repo.stage(&plan.staged_paths())?;
    let commit = repo.commit(&plan.commit_message)?;
    info!(commit = %commit, message = %plan.commit_message, "created release commit");

    repo.create_tag(&plan.tag)?;
    info!(tag = %plan.tag, "created tag");

    if plan.push {
        repo.push_branch(&plan.remote)?;
        repo.push_tag(&plan.remote, &plan.tag)?;
        info!(remote = %plan.remote, tag = %plan.tag, "pushed release");
    }

    Ok(WorkflowResult {
        old_version: plan.old_version,
        new_version: plan.new_version,
        tag: plan.tag,
        commit: Some(commit),
        pushed: plan.push,
        dry_run: false,
        steps,
        warnings: plan.warnings,
    })
}

/// Main release workflow
///
/// Orchestrates the entire release:
/// 1. Require a clean working tree
/// 2. Bump the manifest version
/// 3. Rewrite the package's lock entry (best effort)
/// 4. Stop here for a dry run
/// 5. Write files, commit, tag, push
pub fn run_release_workflow<R: Repository>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
) -> Result<WorkflowResult> {
    let plan = prepare_release(args, config, repo)?;

    if args.dry_run {
        return Ok(WorkflowResult {
            steps: plan.steps(),
            old_version: plan.old_version,
            new_version: plan.new_version,
            tag: plan.tag,
            commit: None,
            pushed: false,
            dry_run: true,
            warnings: plan.warnings,
        });
    }

    apply_release(plan, repo)
}
