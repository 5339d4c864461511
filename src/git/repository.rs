use crate::error::{ReleaseError, Result};
use git2::{
    Commit, Cred, CredentialType, ErrorClass, ErrorCode, PushOptions, RemoteCallbacks,
    Repository as Git2Repo, StatusOptions,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// SSH keys tried after the SSH agent, in order of preference
const SSH_KEY_NAMES: &[&str] = &["id_ed25519", "id_rsa", "id_ecdsa"];

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| ReleaseError::config("Bare repositories are not supported"))
    }

    /// Path of `path` relative to the working directory, as the index expects.
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self.workdir()?.canonicalize()?;
        let absolute = if path.is_absolute() {
            path.canonicalize()?
        } else {
            std::env::current_dir()?.join(path).canonicalize()?
        };

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ReleaseError::config(format!(
                    "'{}' is outside the repository at '{}'",
                    path.display(),
                    workdir.display()
                ))
            })
    }

    /// Build callbacks that authenticate like the git CLI would: SSH agent,
    /// then well-known key files, then the configured credential helper.
    fn remote_callbacks(&self) -> Result<RemoteCallbacks<'static>> {
        let config = self.repo.config()?;
        let mut ssh_attempts = 0usize;
        let mut helper_tried = false;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                ssh_attempts += 1;
                if ssh_attempts == 1 {
                    return Cred::ssh_key_from_agent(username);
                }
                let key = dirs::home_dir().and_then(|home| {
                    SSH_KEY_NAMES
                        .iter()
                        .map(|name| home.join(".ssh").join(name))
                        .filter(|path| path.exists())
                        .nth(ssh_attempts - 2)
                });
                return match key {
                    Some(key) => Cred::ssh_key(username, None, &key, None),
                    None => Err(git2::Error::from_str("no usable SSH credentials")),
                };
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) && !helper_tried {
                helper_tried = true;
                return Cred::credential_helper(&config, url, username_from_url);
            }

            Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        Ok(callbacks)
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| ReleaseError::remote(format!("No remote named '{}' found", remote_name)))?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(self.remote_callbacks()?);

        debug!(remote = remote_name, refspec, "pushing");

        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => ReleaseError::remote(format!("Network error during push: {}", e)),
                _ => ReleaseError::remote(format!(
                    "Failed to push '{}' to '{}': {}",
                    refspec, remote_name, e
                )),
            })
    }
}

impl super::Repository for Git2Repository {
    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseError::DetachedHead);
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or(ReleaseError::DetachedHead)
    }

    fn stage(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            let relative = self.index_path(path)?;
            index.add_path(&relative)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;

        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit()?],
            Err(e) if e.code() == ErrorCode::UnbornBranch => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )?;
        Ok(oid.to_string())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }

    fn push_branch(&self, remote: &str) -> Result<()> {
        let branch = self.current_branch()?;
        self.push_refspec(remote, &format!("refs/heads/{0}:refs/heads/{0}", branch))
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.push_refspec(remote, &format!("refs/tags/{0}:refs/tags/{0}", tag))
    }
}
