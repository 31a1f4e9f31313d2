// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `.SRCINFO` regeneration.

use anyhow::Context;
use tracing::info;

use super::PipelineContext;
use crate::error::Result;

pub const SRCINFO_FILE: &str = ".SRCINFO";

/// Exports `.SRCINFO` from the target PKGBUILD, overwrites the file, and
/// refreshes the snapshot from the same text.
///
/// # Errors
///
/// Returns an error if makepkg fails or the file cannot be written.
pub async fn run(ctx: &mut PipelineContext) -> Result<()> {
    let text = ctx
        .makepkg()
        .print_srcinfo(&ctx.target.pkgbuild())
        .await?;
    let path = ctx.target_dir().join(SRCINFO_FILE);
    tokio::fs::write(&path, &text)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    ctx.update_snapshot(&text)?;
    info!(version = %ctx.descriptor.full_version(), "wrote .SRCINFO");
    Ok(())
}
