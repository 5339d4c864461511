//! Command-line surface: argument parsing and bump selection

pub mod orchestration;

use std::path::PathBuf;

use clap::ArgGroup;

use crate::domain::VersionBump;
use crate::error::{ReleaseError, Result};

/// npm-style variables consulted when no bump flag is passed, in priority order
pub const BUMP_ENV_VARS: [(&str, VersionBump); 3] = [
    ("npm_config_major", VersionBump::Major),
    ("npm_config_minor", VersionBump::Minor),
    ("npm_config_patch", VersionBump::Patch),
];

/// Variable that turns on dry-run mode when set to `true` or `1`
pub const DRY_RUN_ENV_VAR: &str = "npm_config_dry_run";

#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "release-bump",
    version,
    about = "Bump the package version, then commit, tag and push a release"
)]
#[command(group(
    ArgGroup::new("bump")
        .args(["major", "minor", "patch"])
        .multiple(false)
))]
pub struct Args {
    #[arg(long, help = "Bump the major version (X.0.0)")]
    pub major: bool,

    #[arg(long, help = "Bump the minor version (x.Y.0)")]
    pub minor: bool,

    #[arg(long, help = "Bump the patch version (x.y.Z)")]
    pub patch: bool,

    #[arg(
        long,
        alias = "dryrun",
        help = "Preview what would happen without making changes"
    )]
    pub dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long = "dir",
        default_value = ".",
        help = "Project root containing the manifest"
    )]
    pub dir: PathBuf,

    #[arg(long, help = "Create the release commit and tag without pushing")]
    pub no_push: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Args {
    /// Bump kind selected by command-line flags, if any
    pub fn bump_from_flags(&self) -> Option<VersionBump> {
        if self.major {
            Some(VersionBump::Major)
        } else if self.minor {
            Some(VersionBump::Minor)
        } else if self.patch {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }

    /// Flags win over the environment; having neither is an error.
    pub fn resolve_bump<F>(&self, env: F) -> Result<VersionBump>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.bump_from_flags()
            .or_else(|| bump_from_env(env))
            .ok_or_else(|| {
                ReleaseError::bump_kind("Provide --major, --minor, or --patch (e.g., release-bump --patch)")
            })
    }

    pub fn resolve_dry_run<F>(&self, env: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.dry_run || matches!(env(DRY_RUN_ENV_VAR).as_deref(), Some("true") | Some("1"))
    }
}

/// First bump kind whose variable in [BUMP_ENV_VARS] is set to a truthy value.
pub fn bump_from_env<F>(env: F) -> Option<VersionBump>
where
    F: Fn(&str) -> Option<String>,
{
    BUMP_ENV_VARS
        .iter()
        .find(|entry| is_truthy(env(entry.0).as_deref()))
        .map(|entry| entry.1)
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "false" && v != "0")
}
