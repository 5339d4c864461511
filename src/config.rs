use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::Result;
use crate::rewrite::{LockLayout, ManifestTarget};

/// File name looked up in the project root and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-bump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains the files to rewrite, where the version lives inside them, and
/// how the release commit and tag are named and published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_lock_file")]
    pub lock_file: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_push")]
    pub push: bool,

    /// Package name used to find the lock entry; read from the manifest when unset
    #[serde(default)]
    pub package_name: Option<String>,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub lock: LockConfig,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("Cargo.toml")
}

fn default_lock_file() -> PathBuf {
    PathBuf::from("Cargo.lock")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "chore(release): v{version}".to_string()
}

fn default_push() -> bool {
    true
}

/// Where the version lives inside the manifest.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TargetConfig {
    #[serde(default = "default_section")]
    pub section: String,

    #[serde(default = "default_version_key")]
    pub key: String,
}

fn default_section() -> String {
    "package".to_string()
}

fn default_version_key() -> String {
    "version".to_string()
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig {
            section: default_section(),
            key: default_version_key(),
        }
    }
}

/// Layout of the repeated-block lock file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LockConfig {
    #[serde(default = "default_block_marker")]
    pub block_marker: String,

    #[serde(default = "default_name_key")]
    pub name_key: String,

    #[serde(default = "default_version_key")]
    pub version_key: String,
}

fn default_block_marker() -> String {
    "[[package]]".to_string()
}

fn default_name_key() -> String {
    "name".to_string()
}

impl Default for LockConfig {
    fn default() -> Self {
        LockConfig {
            block_marker: default_block_marker(),
            name_key: default_name_key(),
            version_key: default_version_key(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            lock_file: default_lock_file(),
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            push: default_push(),
            package_name: None,
            target: TargetConfig::default(),
            lock: LockConfig::default(),
        }
    }
}

impl Config {
    /// Check every pattern and key in the configuration up front.
    pub fn validate(&self) -> Result<()> {
        self.tag_pattern()?;
        self.commit_pattern()?;
        self.manifest_target()?;
        self.lock_layout()?;
        Ok(())
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.as_str())
    }

    pub fn commit_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.commit_message.as_str())
    }

    pub fn manifest_target(&self) -> Result<ManifestTarget> {
        ManifestTarget::new(&self.target.section, &self.target.key)
    }

    pub fn lock_layout(&self) -> Result<LockLayout> {
        LockLayout::new(
            &self.lock.block_marker,
            &self.lock.name_key,
            &self.lock.version_key,
        )
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-bump.toml` in the project root
/// 3. `release-bump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `root` - Project root the release runs in
///
/// # Returns
/// * `Ok(Config)` - Loaded and validated, or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let project_config = root.join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if project_config.exists() {
        fs::read_to_string(project_config)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(CONFIG_FILE_NAME);
        if user_config.exists() {
            fs::read_to_string(user_config)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
