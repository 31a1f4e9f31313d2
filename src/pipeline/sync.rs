// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository synchronization.
//!
//! ```text
//! Explicit { globs }                 Mirror { dir }
//!   PKGBUILD --> target/PKGBUILD       git work tree?
//!   local sources (use_source_files)     yes: S = ls-files -co --exclude-standard (dir)
//!   glob matches --> target/<name>            T = index of target
//!                                             git rm (T - S), copy S
//!                                        no:  S = files under dir
//!                                             T = files under target minus .git/
//!                                             rm (T - S), copy S
//! ```

use std::collections::BTreeSet;
use std::path::{Component, Path};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::{PKGBUILD_FILE, PipelineContext, StepPolicy};
use crate::config::inputs::AssetSource;
use crate::error::{FsError, ResolutionError, Result};
use crate::git::query;
use crate::utility::fs::copy::{copy_file_async, copy_relative_files_async, remove_file_pruning};
use crate::utility::fs::walk::{WalkOptions, find_files, relative_files};

/// Source prefixes that makepkg fetches through a VCS.
const VCS_PREFIXES: [&str; 5] = ["git+", "svn+", "hg+", "bzr+", "fossil+"];

/// Include-set and delete-set for one synchronization, as `/`-separated
/// paths relative to the target root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    include: BTreeSet<String>,
    delete: BTreeSet<String>,
}

impl SyncPlan {
    /// Plans a sync from the files to keep and the files currently present.
    ///
    /// The delete-set is `current - include`.
    ///
    /// # Errors
    ///
    /// Returns `FsError::PathEscapesRoot` if any path is absolute or has a
    /// `..` component.
    pub fn new(include: BTreeSet<String>, current: &BTreeSet<String>) -> std::result::Result<Self, FsError> {
        for path in include.iter().chain(current) {
            check_relative(path)?;
        }
        let delete = current.difference(&include).cloned().collect();
        Ok(Self { include, delete })
    }

    #[must_use]
    pub const fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    #[must_use]
    pub const fn delete(&self) -> &BTreeSet<String> {
        &self.delete
    }
}

/// Rejects paths that could resolve outside a root.
///
/// # Errors
///
/// Returns `FsError::PathEscapesRoot` for empty, absolute, or `..` paths.
pub fn check_relative(path: &str) -> std::result::Result<(), FsError> {
    let escapes = path.is_empty()
        || Path::new(path).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
    if escapes {
        return Err(FsError::PathEscapesRoot(path.to_string()));
    }
    Ok(())
}

/// Local file named by a `source` entry, or `None` for anything fetched.
///
/// A `name::` rename prefix is stripped first.
#[must_use]
pub fn local_source(entry: &str) -> Option<&str> {
    let location = entry.split_once("::").map_or(entry, |(_, rest)| rest).trim();
    let remote = location.is_empty()
        || location.contains("://")
        || VCS_PREFIXES.iter().any(|p| location.starts_with(p));
    (!remote).then_some(location)
}

/// What a sync did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub copied: usize,
    pub removed: usize,
}

/// Synchronizes the target for the configured asset source.
///
/// # Errors
///
/// Returns an error if a path escapes its root, a copy fails, or the
/// target has no PKGBUILD afterwards.
pub async fn run(ctx: &mut PipelineContext) -> Result<SyncReport> {
    let report = match ctx.options.assets.clone() {
        AssetSource::Explicit { globs } => {
            let (report, extras) = sync_explicit(ctx, &globs).await?;
            ctx.extras_copied = extras;
            report
        }
        AssetSource::Mirror { dir } => sync_mirror(ctx, &dir).await?,
    };

    let pkgbuild = ctx.target.pkgbuild();
    if !pkgbuild.is_file() {
        return Err(ResolutionError::DescriptorMissing {
            path: pkgbuild.display().to_string(),
        }
        .into());
    }
    Ok(report)
}

/// Explicit mode. Returns the report and whether extra files were copied.
async fn sync_explicit(ctx: &PipelineContext, globs: &[String]) -> Result<(SyncReport, bool)> {
    let target = ctx.target_dir();
    let mut report = SyncReport::default();

    copy_file_async(&ctx.options.pkgbuild, &target.join(PKGBUILD_FILE)).await?;
    report.copied += 1;

    let mut extras = 0;
    if ctx.options.use_source_files {
        let sources: BTreeSet<String> = ctx
            .descriptor
            .sources
            .iter()
            .filter_map(|s| local_source(s))
            .map(ToString::to_string)
            .collect();
        for source in &sources {
            check_relative(source)?;
        }
        let source_root = ctx
            .options
            .pkgbuild
            .parent()
            .unwrap_or(ctx.workspace.as_path());
        debug!(count = sources.len(), "copying local sources");
        extras += copy_relative_files_async(source_root, target, &sources).await?;
    }

    for glob in globs {
        let matches = find_files(&ctx.workspace, glob, &WalkOptions::everything())?;
        if matches.is_empty() {
            warn!(glob = %glob, "asset glob matched no files");
        }
        for path in matches {
            let Some(file_name) = path.file_name() else {
                continue;
            };
            copy_file_async(&path, &target.join(file_name)).await?;
            extras += 1;
        }
    }

    report.copied += extras;
    Ok((report, extras > 0))
}

async fn sync_mirror(ctx: &PipelineContext, dir: &Path) -> Result<SyncReport> {
    if !dir.is_dir() {
        return Err(FsError::NotFound(dir.display().to_string()).into());
    }
    if query::is_git_repo(dir) {
        sync_mirror_tracked(ctx, dir).await
    } else {
        info!(dir = %dir.display(), "no git work tree, mirroring every file");
        sync_mirror_blind(ctx, dir).await
    }
}

/// Mirror mode honoring the workspace's ignore rules.
async fn sync_mirror_tracked(ctx: &PipelineContext, dir: &Path) -> Result<SyncReport> {
    let target = ctx.target_dir();

    let included: BTreeSet<String> = ctx
        .git
        .ls_files_included(dir)
        .await?
        .into_iter()
        .filter(|rel| dir.join(rel).is_file())
        .collect();
    let tracked = query::tracked_files(target)?;
    let plan = SyncPlan::new(included, &tracked)?;

    let mut removed = 0;
    for path in plan.delete() {
        let result = ctx.git.rm(target, path).await;
        if StepPolicy::BestEffort.apply("git rm", result)?.is_some() {
            removed += 1;
        }
    }

    let copied = copy_relative_files_async(dir, target, plan.include()).await?;
    Ok(SyncReport { copied, removed })
}

/// Mirror mode without ignore rules.
async fn sync_mirror_blind(ctx: &PipelineContext, dir: &Path) -> Result<SyncReport> {
    let target = ctx.target_dir();
    let walk = WalkOptions::everything();

    let source = relative_files(dir, &walk)?;
    let current = relative_files(target, &walk)?;
    let plan = SyncPlan::new(source, &current)?;

    for path in plan.delete() {
        remove_file_pruning(target, path)
            .await
            .with_context(|| format!("failed to remove stale file {path}"))?;
    }

    let copied = copy_relative_files_async(dir, target, plan.include()).await?;
    Ok(SyncReport {
        copied,
        removed: plan.delete().len(),
    })
}
