// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version detection and PKGBUILD rewriting.
//!
//! ```text
//! makepkg --nobuild --nodeps --holdver      sources into $BUILDDIR/<pkgbase>/src
//!        |
//!        v
//! pkgver() declared? --yes--> bash (cleared env, cwd $srcdir)
//!        | no
//!        v
//! static pkgver
//!        |
//!        v
//! compare with fresh .SRCINFO pkgver --differs--> rewrite pkgver= (pkgrel=1)
//! ```

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::{NoExpand, Regex};
use tracing::info;

use super::PipelineContext;
use crate::core::process::builder::ProcessBuilder;
use crate::descriptor::{declares_pkgver_fn, read_pkgbuild};
use crate::error::{Result, bail_out};

static PKGVER_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^pkgver=.*$").ok());
static PKGREL_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^pkgrel=.*$").ok());

/// Variables passed into the `pkgver()` subprocess besides `srcdir` and `startdir`.
const PASSTHROUGH_VARS: [&str; 3] = ["PATH", "HOME", "LANG"];

/// Result of the version stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    Unchanged(String),
    Bumped { from: String, to: String },
}

/// Rewrites the first `pkgver=` line, and the first `pkgrel=` line when
/// `reset_pkgrel` is set. Everything else is left byte for byte.
///
/// # Errors
///
/// Returns an error if the PKGBUILD has no top-level `pkgver=` line.
pub fn rewrite_version(pkgbuild: &str, pkgver: &str, reset_pkgrel: bool) -> Result<String> {
    let pkgver_re = PKGVER_LINE
        .as_ref()
        .ok_or_else(|| bail_out("pkgver pattern failed to compile"))?;
    if !pkgver_re.is_match(pkgbuild) {
        return Err(bail_out("PKGBUILD has no top-level pkgver= line").into());
    }
    let replacement = format!("pkgver={pkgver}");
    let mut text = pkgver_re
        .replace(pkgbuild, NoExpand(&replacement))
        .into_owned();

    if reset_pkgrel && let Some(pkgrel_re) = PKGREL_LINE.as_ref() {
        text = pkgrel_re.replace(&text, "pkgrel=1").into_owned();
    }
    Ok(text)
}

/// Runs the PKGBUILD's `pkgver()` in a bash subprocess with a cleared
/// environment. `startdir` holds the PKGBUILD and `srcdir` is the
/// extracted source tree, which is also the working directory.
///
/// # Errors
///
/// Returns an error if bash fails or prints nothing.
pub async fn run_pkgver_fn(bash: &Path, startdir: &Path, srcdir: &Path) -> Result<String> {
    let mut command = ProcessBuilder::new(bash)
        .name("pkgver")
        .args([
            "--noprofile",
            "--norc",
            "-c",
            r#"source "$startdir/PKGBUILD" >/dev/null && cd "$srcdir" && pkgver"#,
        ])
        .cwd(srcdir)
        .isolated_env()
        .env("srcdir", srcdir.to_string_lossy())
        .env("startdir", startdir.to_string_lossy())
        .capture_output();
    for key in PASSTHROUGH_VARS {
        if let Ok(value) = std::env::var(key) {
            command = command.env(key, value);
        }
    }

    let output = command.run().await.context("pkgver() failed")?;
    output
        .stdout()
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| bail_out("pkgver() printed no version").into())
}

/// Detects the version and rewrites the target PKGBUILD when it changed.
///
/// # Errors
///
/// Returns an error if fetching sources, `pkgver()`, or the rewrite fails.
pub async fn run(ctx: &mut PipelineContext) -> Result<VersionOutcome> {
    let target = ctx.target_dir().to_path_buf();
    let pkgbuild_path = ctx.target.pkgbuild();
    let makepkg = ctx.makepkg();

    makepkg.fetch_sources(&target).await?;

    let pkgbuild = read_pkgbuild(&pkgbuild_path)?;
    let fresh = makepkg.srcinfo(&pkgbuild_path).await?;
    let current = fresh.base_value("pkgver").unwrap_or_default().to_string();

    let detected = if declares_pkgver_fn(&pkgbuild) {
        let pkgbase = fresh
            .base_value("pkgbase")
            .unwrap_or(ctx.descriptor.name.as_str())
            .to_string();
        let srcdir = ctx.build_area.srcdir(&pkgbase);
        run_pkgver_fn(&ctx.tools.bash(), &target, &srcdir).await?
    } else {
        current.clone()
    };

    if detected == current {
        info!(pkgver = %current, "version unchanged");
        return Ok(VersionOutcome::Unchanged(current));
    }

    info!(from = %current, to = %detected, reset_pkgrel = ctx.options.reset_pkgrel, "bumping version");
    let rewritten = rewrite_version(&pkgbuild, &detected, ctx.options.reset_pkgrel)?;
    tokio::fs::write(&pkgbuild_path, rewritten)
        .await
        .with_context(|| format!("failed to write {}", pkgbuild_path.display()))?;
    ctx.refresh_snapshot().await?;

    Ok(VersionOutcome::Bumped {
        from: current,
        to: detected,
    })
}
