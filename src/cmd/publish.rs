// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::publish::CommitOutcome;
use crate::pipeline::{PublishSummary, run_pipeline};

/// Runs the publish pipeline against `workspace`.
///
/// # Errors
///
/// Returns the first stage error.
pub async fn run_publish_command(config: &Config, workspace: &Path) -> Result<PublishSummary> {
    let summary = run_pipeline(config, workspace).await?;
    info!("{}", summary_line(&summary));
    Ok(summary)
}

/// One-line description of a finished run.
#[must_use]
pub fn summary_line(summary: &PublishSummary) -> String {
    let action = match summary.commit {
        CommitOutcome::Created => "committed and pushed",
        CommitOutcome::Skipped => "unchanged, pushed",
    };
    format!("{} {}: {action}", summary.name, summary.version)
}
