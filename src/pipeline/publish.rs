// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staging, committing, and pushing.
//!
//! ```text
//! post_process (sh -c, cwd target)
//!        |
//!        v
//! stage   DescriptorOnly: git add --force -- PKGBUILD .SRCINFO
//!         WholeTree:      git add --all, then the forced add
//!        |
//!        v
//! commit  allow_empty        --> commit --allow-empty
//!         staged changes     --> commit
//!         nothing staged     --> Skipped
//!        |
//!        v
//! push    force_push parsed here; runs even when the commit was skipped
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::info;

use super::metadata::SRCINFO_FILE;
use super::{PKGBUILD_FILE, PipelineContext};
use crate::config::inputs::AssetSource;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::git::ShellBackend;

/// Whether a commit was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Created,
    Skipped,
}

/// Which paths get staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingMode {
    /// Only the PKGBUILD and `.SRCINFO`, force-added.
    DescriptorOnly,
    /// Every work tree change, plus the forced add.
    WholeTree,
}

impl StagingMode {
    #[must_use]
    pub const fn select(assets: &AssetSource, extras_copied: bool) -> Self {
        match assets {
            AssetSource::Explicit { .. } if !extras_copied => Self::DescriptorOnly,
            _ => Self::WholeTree,
        }
    }
}

/// Runs the post-process command through `sh -c` in the target.
///
/// # Errors
///
/// Returns an error if the command exits non-zero.
pub async fn run_post_process(command: &str, target: &Path) -> Result<()> {
    info!(command, "running post-process command");
    ProcessBuilder::shell(command)
        .name("post-process")
        .cwd(target)
        .inherit_stdio()
        .run()
        .await
        .context("post-process command failed")?;
    Ok(())
}

/// Stages the target according to `mode`.
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub async fn stage(git: &ShellBackend, target: &Path, mode: StagingMode) -> Result<()> {
    if mode == StagingMode::WholeTree {
        git.add_all(target).await?;
    }
    git.add_force(target, &[PKGBUILD_FILE, SRCINFO_FILE]).await
}

/// Commits staged changes. Nothing staged and no `allow_empty` is a skip.
///
/// # Errors
///
/// Returns a `GitError` if the diff check or the commit fails.
pub async fn commit(
    git: &ShellBackend,
    target: &Path,
    message: &str,
    allow_empty: bool,
) -> Result<CommitOutcome> {
    if !allow_empty && !git.has_staged_changes(target).await? {
        info!("no changes to commit");
        return Ok(CommitOutcome::Skipped);
    }
    git.commit(target, message, allow_empty).await?;
    info!(message, "committed");
    Ok(CommitOutcome::Created)
}

/// Post-process, stage, commit, push.
///
/// # Errors
///
/// Returns the first failure, including `ConfigError::InvalidValue` for a
/// `force_push` that is not a literal boolean.
pub async fn run(ctx: &PipelineContext) -> Result<CommitOutcome> {
    let target = ctx.target_dir();
    let options = &ctx.options;

    if let Some(command) = &options.post_process {
        run_post_process(command, target).await?;
    }

    let mode = StagingMode::select(&options.assets, ctx.extras_copied);
    stage(&ctx.git, target, mode).await?;

    let outcome = commit(
        &ctx.git,
        target,
        &options.identity.message,
        options.allow_empty_commits,
    )
    .await?;

    let force = options.force_push()?;
    info!(remote = %ctx.remote.push_remote, branch = %ctx.remote.branch, force, "pushing");
    ctx.git
        .push(target, &ctx.remote.push_remote, &ctx.remote.branch, force)
        .await?;

    Ok(outcome)
}
