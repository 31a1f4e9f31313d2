// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package descriptor model.
//!
//! The PKGBUILD is never interpreted in-process. Everything here is built
//! from the structured `.SRCINFO` export plus one textual check for a
//! `pkgver()` function.
//!
//! ```text
//! makepkg --printsrcinfo --> Srcinfo::parse --> PackageDescriptor::resolve
//!                                                 name: override | pkgname[0] | pkgbase
//! ```

pub mod srcinfo;


use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use serde::Serialize;

use crate::error::{ResolutionError, Result};

pub use srcinfo::{Field, Section, Srcinfo};

/// Dependency fields read from `.SRCINFO`, arch variants included.
pub const DEPENDENCY_FIELDS: [&str; 3] = ["makedepends", "depends", "checkdepends"];

static PKGVER_FN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:function[ \t]+)?pkgver[ \t]*\([ \t]*\)").ok());

/// Whether the PKGBUILD text defines a `pkgver()` function.
#[must_use]
pub fn declares_pkgver_fn(pkgbuild: &str) -> bool {
    PKGVER_FN.as_ref().is_some_and(|re| re.is_match(pkgbuild))
}

/// Reads a PKGBUILD.
///
/// # Errors
///
/// Returns `ResolutionError::DescriptorMissing` if the file does not exist.
pub fn read_pkgbuild(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ResolutionError::DescriptorMissing {
            path: path.display().to_string(),
        }
        .into());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Snapshot of the fields the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub pkgver: String,
    pub pkgrel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<String>,
    pub makedepends: Vec<String>,
    pub depends: Vec<String>,
    pub checkdepends: Vec<String>,
    pub sources: Vec<String>,
    pub has_pkgver_fn: bool,
}

impl PackageDescriptor {
    /// Builds the snapshot.
    ///
    /// `origin` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::NameUndeterminable` when there is no
    /// override, no `pkgname`, and no `pkgbase`.
    pub fn resolve(
        srcinfo: &Srcinfo,
        pkgbuild: &str,
        name_override: Option<&str>,
        origin: &Path,
    ) -> std::result::Result<Self, ResolutionError> {
        let name = resolve_name(srcinfo, name_override).ok_or_else(|| {
            ResolutionError::NameUndeterminable {
                path: origin.display().to_string(),
            }
        })?;

        Ok(Self {
            name,
            pkgver: srcinfo.base_value("pkgver").unwrap_or_default().to_string(),
            pkgrel: srcinfo.base_value("pkgrel").unwrap_or_default().to_string(),
            epoch: srcinfo.base_value("epoch").map(ToString::to_string),
            makedepends: srcinfo.collect_all("makedepends"),
            depends: srcinfo.collect_all("depends"),
            checkdepends: srcinfo.collect_all("checkdepends"),
            sources: srcinfo.collect_all("source"),
            has_pkgver_fn: declares_pkgver_fn(pkgbuild),
        })
    }

    /// `[epoch:]pkgver-pkgrel`.
    #[must_use]
    pub fn full_version(&self) -> String {
        match &self.epoch {
            Some(epoch) if epoch != "0" => format!("{epoch}:{}-{}", self.pkgver, self.pkgrel),
            _ => format!("{}-{}", self.pkgver, self.pkgrel),
        }
    }

    /// Every raw dependency entry, in field order.
    pub fn dependency_entries(&self) -> impl Iterator<Item = &str> {
        self.makedepends
            .iter()
            .chain(&self.depends)
            .chain(&self.checkdepends)
            .map(String::as_str)
    }
}

/// Override, then first `pkgname`, then `pkgbase`. Blank values never win.
fn resolve_name(srcinfo: &Srcinfo, name_override: Option<&str>) -> Option<String> {
    name_override
        .into_iter()
        .chain(srcinfo.package_names().take(1))
        .chain(srcinfo.base.as_ref().map(|b| b.name.as_str()))
        .map(str::trim)
        .find(|n| !n.is_empty())
        .map(ToString::to_string)
}
