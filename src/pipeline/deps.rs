// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency resolution and installation.
//!
//! ```text
//! makedepends* + depends* + checkdepends*   (snapshot)
//!        |  canonical_name: cut at < > =, then at :
//!        v
//! DependencySet (sorted, unique)
//!        |
//!        v
//! refresh_database (best effort)
//! for each name:
//!   1. is_satisfied        --> skip
//!   2. install_from_repos  --> done   (failure falls through)
//!   3. build_from_remote   --> done
//!   4. UnresolvableDependency
//! ```

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::{PipelineContext, StepPolicy};
use crate::error::{ResolutionError, Result};
use crate::tools::PackageInstaller;

/// Strips version constraints and qualifiers from a dependency entry.
///
/// `"foo>=1.2"` and `"foo: optional"` both become `"foo"`. Blank entries
/// yield `None`.
#[must_use]
pub fn canonical_name(entry: &str) -> Option<String> {
    let name = entry
        .split(['<', '>', '='])
        .next()
        .and_then(|n| n.split(':').next())
        .map(str::trim)?;
    (!name.is_empty()).then(|| name.to_string())
}

/// Canonical dependency names, unique and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet(BTreeSet<String>);

impl DependencySet {
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .filter_map(|e| canonical_name(e.as_ref()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// How one dependency was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    AlreadyInstalled,
    Repository,
    RemoteBuild,
}

/// Per-name resolution results, in set order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub entries: Vec<(String, Resolution)>,
}

impl ResolutionReport {
    /// Number of dependencies that needed an install.
    #[must_use]
    pub fn installed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, r)| *r != Resolution::AlreadyInstalled)
            .count()
    }
}

/// Resolves every name in `deps` through `installer`.
///
/// # Errors
///
/// Returns `ResolutionError::UnresolvableDependency` for the first name
/// that no method could install, or any error from the installer's
/// satisfaction query or remote build.
pub async fn resolve_all(
    installer: &dyn PackageInstaller,
    deps: &DependencySet,
) -> Result<ResolutionReport> {
    let mut report = ResolutionReport::default();
    if deps.is_empty() {
        debug!("no dependencies");
        return Ok(report);
    }

    StepPolicy::BestEffort.apply(
        "refresh package database",
        installer.refresh_database().await,
    )?;

    for name in deps.iter() {
        let resolution = resolve_one(installer, name).await?;
        report.entries.push((name.to_string(), resolution));
    }
    Ok(report)
}

async fn resolve_one(installer: &dyn PackageInstaller, name: &str) -> Result<Resolution> {
    if installer.is_satisfied(name).await? {
        debug!(dependency = name, "already satisfied");
        return Ok(Resolution::AlreadyInstalled);
    }

    match installer.install_from_repos(name).await {
        Ok(()) => {
            info!(dependency = name, "installed from repositories");
            return Ok(Resolution::Repository);
        }
        Err(e) => {
            warn!(dependency = name, error = %format!("{e:#}"), "not installable from repositories");
        }
    }

    if installer.build_from_remote(name).await? {
        info!(dependency = name, "built from remote");
        return Ok(Resolution::RemoteBuild);
    }

    Err(ResolutionError::UnresolvableDependency {
        name: name.to_string(),
        message: "not in any repository and no PKGBUILD on the remote host".to_string(),
    }
    .into())
}

/// Resolves the dependencies of the current snapshot.
///
/// # Errors
///
/// Same as [`resolve_all`].
pub async fn run(ctx: &PipelineContext, installer: &dyn PackageInstaller) -> Result<ResolutionReport> {
    let deps = DependencySet::from_entries(ctx.descriptor.dependency_entries());
    info!(count = deps.len(), "resolving dependencies");
    let report = resolve_all(installer, &deps).await?;
    info!(installed = report.installed(), total = deps.len(), "dependencies ready");
    Ok(report)
}
