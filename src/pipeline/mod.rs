// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The publish pipeline.
//!
//! # Architecture
//!
//! ```text
//! run_pipeline(config, workspace)
//!      |
//!      v
//!  1. inputs     PublishOptions::from_inputs, tool preflight
//!  2. resolve    local .SRCINFO --> PackageDescriptor (name)
//!  3. clone      RemoteRepository (TempDir, push remote, identity)
//!                BuildArea (makepkg SRCDEST, BUILDDIR, PKGDEST, ...)
//!  4. sync       SyncPlan --> target
//!  5. version    pkgver() --> rewrite pkgver/pkgrel      (optional)
//!     checksums  updpkgsums                              (optional)
//!  6. deps       DependencySet --> PackageInstaller      (optional)
//!     validate   hook --> deps --> makepkg <flags>       (optional)
//!  7. metadata   makepkg --printsrcinfo > .SRCINFO
//!  8. publish    post-process --> stage --> commit --> push
//! ```
//!
//! Every stage runs inside a [`LogGroup`] and an `info_span!`. The first
//! failing stage ends the run. Push is always last.
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PipelineContext`] | Workspace, target clone, options, descriptor snapshot |
//! | [`RemoteRepository`] | Temporary clone of the package's remote repository |
//! | [`StepPolicy`] | Whether a failing step aborts the run |
//! | [`PublishSummary`] | What a successful run did |

pub mod deps;
pub mod metadata;
pub mod publish;
pub mod sync;
pub mod validate;
pub mod version;


use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;
use tracing::{Instrument, info, info_span, warn};

use crate::config::Config;
use crate::config::inputs::{CommitIdentity, PublishOptions};
use crate::config::types::RemoteConfig;
use crate::descriptor::{PackageDescriptor, Srcinfo, read_pkgbuild};
use crate::error::{ConfigError, Result};
use crate::git::ShellBackend;
use crate::logging::LogGroup;
use crate::tools::makepkg::BuildArea;
use crate::tools::{Makepkg, PackageInstaller, Pacman, ToolContext};

use publish::CommitOutcome;

/// File name of the descriptor inside the target.
pub const PKGBUILD_FILE: &str = "PKGBUILD";

/// What happens when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// The run aborts.
    Required,
    /// The failure is logged and the run continues.
    BestEffort,
}

impl StepPolicy {
    /// Applies the policy to a step's result.
    ///
    /// Returns `Ok(None)` for a tolerated failure.
    ///
    /// # Errors
    ///
    /// Returns the step's error under [`StepPolicy::Required`].
    pub fn apply<T>(self, step: &str, result: Result<T>) -> Result<Option<T>> {
        match (self, result) {
            (_, Ok(value)) => Ok(Some(value)),
            (Self::Required, Err(e)) => Err(e),
            (Self::BestEffort, Err(e)) => {
                warn!(step, error = %format!("{e:#}"), "step failed, continuing");
                Ok(None)
            }
        }
    }
}

/// A temporary clone of the package's remote repository.
///
/// The clone lives in its own temporary directory, removed on drop.
#[derive(Debug)]
pub struct RemoteRepository {
    _dir: TempDir,
    path: PathBuf,
    clone_url: String,
}

impl RemoteRepository {
    /// Clones the repository for `name` and adds the push remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails or the push remote cannot be set.
    pub async fn open(git: &ShellBackend, remote: &RemoteConfig, name: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("aurpub-")
            .tempdir()
            .context("failed to create clone directory")?;
        let path = dir.path().join(name);
        let clone_url = remote.clone_url(name);

        info!(url = %clone_url, "cloning");
        git.clone_repo(&clone_url, &path).await?;

        let push_url = remote.push_url(name);
        if remote.push_remote == "origin" {
            git.set_remote_url(&path, "origin", &push_url).await?;
        } else {
            git.add_remote(&path, &remote.push_remote, &push_url).await?;
        }

        Ok(Self {
            _dir: dir,
            path,
            clone_url,
        })
    }

    /// Writes the commit identity into the clone's local config.
    ///
    /// # Errors
    ///
    /// Returns an error if git config fails.
    pub async fn configure_identity(&self, git: &ShellBackend, identity: &CommitIdentity) -> Result<()> {
        git.set_config(&self.path, "user.name", &identity.username)
            .await?;
        git.set_config(&self.path, "user.email", &identity.email)
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    #[must_use]
    pub fn pkgbuild(&self) -> PathBuf {
        self.path.join(PKGBUILD_FILE)
    }
}

/// State threaded through every stage.
#[derive(Debug)]
pub struct PipelineContext {
    pub workspace: PathBuf,
    pub options: PublishOptions,
    pub remote: RemoteConfig,
    pub tools: ToolContext,
    pub git: ShellBackend,
    pub target: RemoteRepository,
    /// makepkg's downloads, build trees and packages. Never inside `target`.
    pub build_area: BuildArea,
    /// Latest `.SRCINFO` export of the target's PKGBUILD.
    pub srcinfo: Srcinfo,
    pub descriptor: PackageDescriptor,
    /// Whether explicit mode copied anything besides the PKGBUILD.
    pub extras_copied: bool,
}

impl PipelineContext {
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        self.target.path()
    }

    /// makepkg runner writing into the build area.
    #[must_use]
    pub fn makepkg(&self) -> Makepkg {
        self.tools.makepkg().with_build_area(&self.build_area)
    }

    /// Re-exports `.SRCINFO` from the target and refreshes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails or yields no package name.
    pub async fn refresh_snapshot(&mut self) -> Result<()> {
        let text = self
            .makepkg()
            .print_srcinfo(&self.target.pkgbuild())
            .await?;
        self.update_snapshot(&text)
    }

    /// Replaces the snapshot with an already exported `.SRCINFO`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or yields no package name.
    pub fn update_snapshot(&mut self, srcinfo_text: &str) -> Result<()> {
        let pkgbuild_path = self.target.pkgbuild();
        let pkgbuild = read_pkgbuild(&pkgbuild_path)?;
        let srcinfo = Srcinfo::parse(srcinfo_text)?;
        let descriptor = PackageDescriptor::resolve(
            &srcinfo,
            &pkgbuild,
            self.options.pkgname.as_deref(),
            &pkgbuild_path,
        )?;
        self.srcinfo = srcinfo;
        self.descriptor = descriptor;
        Ok(())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    pub name: String,
    pub version: String,
    pub commit: CommitOutcome,
}

/// Runs `body` as a named stage: a log group plus a tracing span.
async fn stage<T, F>(title: &str, body: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let _group = LogGroup::open(title);
    body.instrument(info_span!("stage", name = title))
        .await
        .with_context(|| format!("{title} failed"))
}

/// Runs the whole pipeline with the pacman-backed installer.
///
/// # Errors
///
/// Returns the first stage error.
pub async fn run_pipeline(config: &Config, workspace: &Path) -> Result<PublishSummary> {
    let tools = ToolContext::new(config.tools.clone());
    let installer = Pacman::builder()
        .pacman(&tools.config().pacman)
        .maybe_sudo(tools.sudo())
        .makepkg(tools.makepkg())
        .git(tools.git(
            config
                .publish
                .git_ssh_command
                .clone()
                .filter(|c| !c.trim().is_empty()),
        ))
        .remote(config.remote.clone())
        .build();
    run_pipeline_with(config, workspace, &installer).await
}

/// Runs the whole pipeline with an explicit installer.
///
/// # Errors
///
/// Returns the first stage error.
pub async fn run_pipeline_with(
    config: &Config,
    workspace: &Path,
    installer: &dyn PackageInstaller,
) -> Result<PublishSummary> {
    let tools = ToolContext::new(config.tools.clone());

    let options = stage("Validating inputs", async {
        let options = PublishOptions::from_inputs(&config.publish, workspace)?;
        tools.preflight(tools.required_programs(&options))?;
        Ok(options)
    })
    .await?;

    let (local_srcinfo, descriptor) = stage("Resolving package", async {
        let pkgbuild = read_pkgbuild(&options.pkgbuild)?;
        let srcinfo = tools.makepkg().srcinfo(&options.pkgbuild).await?;
        let descriptor = PackageDescriptor::resolve(
            &srcinfo,
            &pkgbuild,
            options.pkgname.as_deref(),
            &options.pkgbuild,
        )?;
        check_package_name(&descriptor.name)?;
        info!(name = %descriptor.name, version = %descriptor.full_version(), "resolved");
        Ok((srcinfo, descriptor))
    })
    .await?;

    let git = tools.git(options.git_ssh_command.clone());
    let target = stage(&format!("Cloning {}", descriptor.name), async {
        let target = RemoteRepository::open(&git, &config.remote, &descriptor.name).await?;
        target.configure_identity(&git, &options.identity).await?;
        Ok(target)
    })
    .await?;

    let mut ctx = PipelineContext {
        workspace: workspace.to_path_buf(),
        options,
        remote: config.remote.clone(),
        tools,
        git,
        target,
        build_area: BuildArea::create()?,
        srcinfo: local_srcinfo,
        descriptor,
        extras_copied: false,
    };

    stage("Synchronizing files", async {
        let report = sync::run(&mut ctx).await?;
        info!(copied = report.copied, removed = report.removed, "synchronized");
        ctx.refresh_snapshot().await
    })
    .await?;

    if ctx.options.auto_detect_version {
        stage("Detecting version", version::run(&mut ctx)).await?;
    }

    if ctx.options.updpkgsums {
        stage("Updating checksums", async {
            let program = ctx.tools.config().updpkgsums.clone();
            crate::tools::makepkg::update_checksums(&program, ctx.target_dir()).await
        })
        .await?;
    }

    if ctx.options.test {
        stage("Validating build", validate::run(&ctx, installer)).await?;
    } else if ctx.options.auto_install_deps {
        stage("Installing dependencies", async {
            deps::run(&ctx, installer).await.map(|_| ())
        })
        .await?;
    }

    stage("Generating .SRCINFO", metadata::run(&mut ctx)).await?;

    let commit = stage("Publishing", publish::run(&ctx)).await?;

    Ok(PublishSummary {
        name: ctx.descriptor.name.clone(),
        version: ctx.descriptor.full_version(),
        commit,
    })
}

/// A package name must be a single path component.
fn check_package_name(name: &str) -> std::result::Result<(), ConfigError> {
    if name.contains('/') || name == "." || name == ".." {
        return Err(ConfigError::InvalidValue {
            key: "pkgname".to_string(),
            message: format!("'{name}' is not a valid package name"),
        });
    }
    Ok(())
}
