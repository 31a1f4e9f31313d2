// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trial build before publishing.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use super::{PipelineContext, deps};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{FsError, Result};
use crate::tools::PackageInstaller;

/// Runs a pre-build hook with `target` as working directory.
///
/// Executable hooks run directly, anything else through `bash`.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the hook does not exist, or an error if
/// it exits non-zero.
pub async fn run_hook(hook: &Path, target: &Path, bash: &Path) -> Result<()> {
    let metadata = std::fs::metadata(hook)
        .map_err(|_| FsError::NotFound(hook.display().to_string()))?;
    let executable = metadata.is_file() && metadata.permissions().mode() & 0o111 != 0;

    let command = if executable {
        ProcessBuilder::new(hook)
    } else {
        ProcessBuilder::new(bash).arg(hook)
    };
    info!(hook = %hook.display(), executable, "running pre-build hook");
    command
        .name("pre-build-hook")
        .cwd(target)
        .inherit_stdio()
        .run()
        .await
        .context("pre-build hook failed")?;
    Ok(())
}

/// Hook, then dependencies when enabled, then makepkg with the test flags.
///
/// # Errors
///
/// Returns the first failure. There is no retry.
pub async fn run(ctx: &PipelineContext, installer: &dyn PackageInstaller) -> Result<()> {
    let target = ctx.target_dir();

    if let Some(hook) = &ctx.options.pre_build_hook {
        run_hook(hook, target, &ctx.tools.bash()).await?;
    }

    if ctx.options.auto_install_deps {
        deps::run(ctx, installer).await?;
    }

    ctx.makepkg().build(target, &ctx.options.test_flags).await
}
