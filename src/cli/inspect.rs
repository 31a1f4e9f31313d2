// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Args;
use std::path::PathBuf;

/// Arguments for the inspect command.
#[derive(Debug, Clone, Default, Args)]
pub struct InspectArgs {
    /// PKGBUILD to inspect (defaults to the configured one)
    #[arg(long, value_name = "PATH")]
    pub pkgbuild: Option<PathBuf>,

    /// Package name override
    #[arg(long, value_name = "NAME")]
    pub pkgname: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
