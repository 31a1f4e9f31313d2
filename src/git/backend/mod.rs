// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend   (pure Rust gix, no subprocess)
//! ShellBackend (write) --> git CLI via ProcessBuilder (clone, rm, add, commit, push)
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{GitError, GixError, PublishResult, Result};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Paths recorded in the index, relative to the work tree root.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or index access fails.
    fn tracked_files(path: &Path) -> PublishResult<BTreeSet<String>>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn tracked_files(path: &Path) -> PublishResult<BTreeSet<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        if repo.workdir().is_none() {
            return Err(GitError::Gix(GixError::BareRepository).into());
        }
        let index = repo
            .index_or_empty()
            .map_err(|e| GitError::Gix(GixError::Index(e)))?;
        Ok(index
            .entries()
            .iter()
            .map(|entry| entry.path(&index).to_string())
            .collect())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend for every operation that writes.
///
/// Runs the configured git executable with `GCM_INTERACTIVE=never`,
/// `GIT_TERMINAL_PROMPT=0`, and `GIT_SSH_COMMAND` when one is set.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: PathBuf,
    ssh_command: Option<String>,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellBackend {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ssh_command: None,
        }
    }

    /// Uses `command` as `GIT_SSH_COMMAND` for clone and push.
    #[must_use]
    pub fn with_ssh_command(mut self, command: Option<String>) -> Self {
        self.ssh_command = command;
        self
    }

    fn command(&self, args: &[&str], cwd: &Path) -> ProcessBuilder {
        let builder = ProcessBuilder::new(&self.program)
            .name("git")
            .args(args)
            .cwd(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .capture_output()
            .flag(ProcessFlags::ALLOW_FAILURE);
        match &self.ssh_command {
            Some(ssh) => builder.env("GIT_SSH_COMMAND", ssh.clone()),
            None => builder,
        }
    }

    /// Runs git and returns the raw output. The exit code is not checked.
    async fn run_raw(&self, args: &[&str], cwd: &Path) -> Result<ProcessOutput> {
        self.command(args, cwd).run().await
    }

    /// Runs git and fails on a non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::CommandFailed` carrying stderr on non-zero exit.
    async fn run_checked(&self, args: &[&str], cwd: &Path) -> Result<ProcessOutput> {
        let output = self.run_raw(args, cwd).await?;
        if !output.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }

    /// Runs git and returns trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::CommandFailed` carrying stderr on non-zero exit.
    pub(crate) async fn git_command(&self, args: &[&str], cwd: &Path) -> Result<String> {
        let output = self.run_checked(args, cwd).await?;
        Ok(output.stdout().trim().to_string())
    }

    /// Clones `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::CloneFailed` if git fails.
    pub async fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        let output = self
            .run_raw(&["clone", "--quiet", url, dest_str], parent)
            .await?;
        if !output.success() {
            return Err(GitError::CloneFailed {
                url: url.to_string(),
                message: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Files git would consider for commit under `dir`: tracked plus
    /// untracked, minus ignored. Paths are relative to `dir`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git ls-files` fails.
    pub async fn ls_files_included(&self, dir: &Path) -> Result<BTreeSet<String>> {
        let output = self
            .run_checked(
                &["ls-files", "-z", "--cached", "--others", "--exclude-standard"],
                dir,
            )
            .await?;
        Ok(split_nul(output.stdout()))
    }

    /// Removes a tracked path from the index and the work tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git rm` fails, e.g. the path is not tracked.
    pub async fn rm(&self, repo: &Path, path: &str) -> Result<()> {
        self.git_command(&["rm", "--quiet", "--force", "--", path], repo)
            .await?;
        Ok(())
    }

    /// Stages every change in the work tree, deletions included.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    pub async fn add_all(&self, repo: &Path) -> Result<()> {
        self.git_command(&["add", "--all"], repo).await?;
        Ok(())
    }

    /// Stages `paths` even if ignore rules exclude them.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    pub async fn add_force(&self, repo: &Path, paths: &[&str]) -> Result<()> {
        let mut args = vec!["add", "--force", "--"];
        args.extend_from_slice(paths);
        self.git_command(&args, repo).await?;
        Ok(())
    }

    /// Whether the index differs from `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git diff` exits with anything but 0 or 1.
    pub async fn has_staged_changes(&self, repo: &Path) -> Result<bool> {
        let args = ["diff", "--cached", "--quiet"];
        let output = self.run_raw(&args, repo).await?;
        match output.exit_code() {
            0 => Ok(false),
            1 => Ok(true),
            code => Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: format!("exit code {code}: {}", output.stderr().trim()),
            }
            .into()),
        }
    }

    /// Creates a commit with `message`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git commit` fails.
    pub async fn commit(&self, repo: &Path, message: &str, allow_empty: bool) -> Result<()> {
        let mut args = vec!["commit", "--quiet"];
        if allow_empty {
            args.push("--allow-empty");
        }
        args.extend(["-m", message]);
        self.git_command(&args, repo).await?;
        Ok(())
    }

    /// Pushes `HEAD` to `branch` on `remote`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::PushFailed` if git rejects the push.
    pub async fn push(&self, repo: &Path, remote: &str, branch: &str, force: bool) -> Result<()> {
        let refspec = format!("HEAD:refs/heads/{branch}");
        let mut args = vec!["push", "--quiet"];
        if force {
            args.push("--force");
        }
        args.extend([remote, refspec.as_str()]);
        debug!(remote, branch, force, "pushing");

        let output = self.run_raw(&args, repo).await?;
        if !output.success() {
            return Err(GitError::PushFailed {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Adds a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote cannot be added.
    pub async fn add_remote(&self, repo: &Path, name: &str, url: &str) -> Result<()> {
        self.git_command(&["remote", "add", name, url], repo).await?;
        Ok(())
    }

    /// Points an existing remote at `url`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote does not exist.
    pub async fn set_remote_url(&self, repo: &Path, name: &str, url: &str) -> Result<()> {
        self.git_command(&["remote", "set-url", name, url], repo)
            .await?;
        Ok(())
    }

    /// Sets a value in the repository's local config.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    pub async fn set_config(&self, repo: &Path, key: &str, value: &str) -> Result<()> {
        self.git_command(&["config", "--local", key, value], repo)
            .await?;
        Ok(())
    }

    /// Number of commits reachable from `HEAD`, 0 for an unborn branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git rev-list` fails for another reason.
    pub async fn commit_count(&self, repo: &Path) -> Result<usize> {
        let output = self.run_raw(&["rev-list", "--count", "HEAD"], repo).await?;
        if !output.success() {
            return Ok(0);
        }
        output.stdout().trim().parse().map_err(|e| {
            anyhow::Error::from(GitError::CommandFailed {
                command: "git rev-list --count HEAD".to_string(),
                message: format!("unexpected output: {e}"),
            })
        })
    }
}

fn split_nul(stdout: &str) -> BTreeSet<String> {
    stdout
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}
