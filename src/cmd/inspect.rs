// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inspect command.
//!
//! ```text
//! PKGBUILD --makepkg --printsrcinfo--> Srcinfo
//!        |
//!        v
//! PackageDescriptor + DependencySet + local sources
//!        |
//!        v
//! text lines | JSON
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::cli::inspect::InspectArgs;
use crate::config::Config;
use crate::config::inputs::DEFAULT_PKGBUILD;
use crate::descriptor::{PackageDescriptor, Srcinfo, read_pkgbuild};
use crate::error::Result;
use crate::pipeline::deps::DependencySet;
use crate::pipeline::sync::local_source;
use crate::tools::ToolContext;

/// What aurpub would publish for a PKGBUILD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub name: String,
    pub version: String,
    pub packages: Vec<String>,
    pub dependencies: Vec<String>,
    pub local_sources: Vec<String>,
    pub has_pkgver_fn: bool,
}

impl InspectReport {
    #[must_use]
    pub fn new(descriptor: &PackageDescriptor, srcinfo: &Srcinfo) -> Self {
        let dependencies = DependencySet::from_entries(descriptor.dependency_entries())
            .iter()
            .map(ToString::to_string)
            .collect();
        let local_sources = descriptor
            .sources
            .iter()
            .filter_map(|s| local_source(s))
            .map(ToString::to_string)
            .collect();
        Self {
            name: descriptor.name.clone(),
            version: descriptor.full_version(),
            packages: srcinfo.package_names().map(ToString::to_string).collect(),
            dependencies,
            local_sources,
            has_pkgver_fn: descriptor.has_pkgver_fn,
        }
    }

    /// Human-readable rendering.
    #[must_use]
    pub fn format_lines(&self) -> Vec<String> {
        let list = |items: &[String]| {
            if items.is_empty() {
                "(none)".to_string()
            } else {
                items.join(" ")
            }
        };
        vec![
            format!("name          = {}", self.name),
            format!("version       = {}", self.version),
            format!("packages      = {}", list(&self.packages)),
            format!("dependencies  = {}", list(&self.dependencies)),
            format!("local sources = {}", list(&self.local_sources)),
            format!("pkgver()      = {}", if self.has_pkgver_fn { "yes" } else { "no" }),
        ]
    }
}

/// PKGBUILD path from the flag, then `[publish] pkgbuild`, then `PKGBUILD`.
#[must_use]
pub fn pkgbuild_path(args: &InspectArgs, config: &Config, workspace: &Path) -> PathBuf {
    let relative = args.pkgbuild.clone().unwrap_or_else(|| {
        PathBuf::from(
            config
                .publish
                .pkgbuild
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PKGBUILD),
        )
    });
    workspace.join(relative)
}

/// Resolves and prints the report.
///
/// # Errors
///
/// Returns an error if the PKGBUILD is missing, makepkg fails, or the
/// package name cannot be determined.
pub async fn run_inspect_command(args: &InspectArgs, config: &Config, workspace: &Path) -> Result<()> {
    let path = pkgbuild_path(args, config, workspace);
    let pkgbuild = read_pkgbuild(&path)?;
    let srcinfo = ToolContext::new(config.tools.clone())
        .makepkg()
        .srcinfo(&path)
        .await?;

    let name_override = args
        .pkgname
        .as_deref()
        .or(config.publish.pkgname.as_deref())
        .filter(|n| !n.is_empty());
    let descriptor = PackageDescriptor::resolve(&srcinfo, &pkgbuild, name_override, &path)?;
    let report = InspectReport::new(&descriptor, &srcinfo);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        for line in report.format_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
