// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! makepkg and updpkgsums invocations.
//!
//! | Operation | Arguments | Output |
//! |-----------|-----------|--------|
//! | [`Makepkg::print_srcinfo`] | `-p <file> --printsrcinfo` | captured |
//! | [`Makepkg::fetch_sources`] | `--nobuild --nodeps --holdver` | log |
//! | [`Makepkg::build`] | caller flags | inherited |
//! | [`Makepkg::install_package`] | `--syncdeps --install --noconfirm --needed` | inherited |
//! | [`update_checksums`] | none | log |
//!
//! A runner bound to a [`BuildArea`] exports `SRCDEST`, `BUILDDIR`,
//! `PKGDEST`, `SRCPKGDEST` and `LOGDEST` so downloads, extracted trees,
//! packages and logs land outside the package directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;
use tracing::info;

use crate::core::process::builder::ProcessBuilder;
use crate::descriptor::Srcinfo;
use crate::error::Result;

/// makepkg variable and subdirectory of the build area it points at.
const BUILD_AREA_LAYOUT: [(&str, &str); 5] = [
    ("SRCDEST", "sources"),
    ("BUILDDIR", "build"),
    ("PKGDEST", "packages"),
    ("SRCPKGDEST", "source-packages"),
    ("LOGDEST", "logs"),
];

/// Scratch directory tree for makepkg output, removed on drop.
#[derive(Debug)]
pub struct BuildArea {
    dir: TempDir,
}

impl BuildArea {
    /// Creates the temporary directory and every makepkg destination in it.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("aurpub-build-")
            .tempdir()
            .context("failed to create build directory")?;
        for (_, sub) in BUILD_AREA_LAYOUT {
            let path = dir.path().join(sub);
            std::fs::create_dir_all(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
        }
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `$srcdir` as makepkg lays it out under `BUILDDIR`.
    #[must_use]
    pub fn srcdir(&self, pkgbase: &str) -> PathBuf {
        self.path().join("build").join(pkgbase).join("src")
    }
}

/// makepkg runner bound to one executable.
#[derive(Debug, Clone)]
pub struct Makepkg {
    program: PathBuf,
    build_root: Option<PathBuf>,
}

impl Default for Makepkg {
    fn default() -> Self {
        Self::new("makepkg")
    }
}

impl Makepkg {
    #[must_use]
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            build_root: None,
        }
    }

    /// Points every makepkg destination into `area`.
    #[must_use]
    pub fn with_build_area(mut self, area: &BuildArea) -> Self {
        self.build_root = Some(area.path().to_path_buf());
        self
    }

    fn command(&self, dir: &Path) -> ProcessBuilder {
        let mut command = ProcessBuilder::new(&self.program).name("makepkg").cwd(dir);
        if let Some(root) = &self.build_root {
            for (var, sub) in BUILD_AREA_LAYOUT {
                command = command.env(var, root.join(sub).to_string_lossy());
            }
        }
        command
    }

    /// Returns the raw `.SRCINFO` text for `pkgbuild`.
    ///
    /// makepkg runs in the PKGBUILD's directory with `-p <file name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if makepkg fails.
    pub async fn print_srcinfo(&self, pkgbuild: &Path) -> Result<String> {
        let dir = pkgbuild.parent().unwrap_or_else(|| Path::new("."));
        let file = pkgbuild
            .file_name()
            .map_or_else(|| "PKGBUILD".into(), |f| f.to_string_lossy());
        let output = self
            .command(dir)
            .args(["-p", &*file, "--printsrcinfo"])
            .capture_stdout()
            .run()
            .await
            .with_context(|| format!("failed to export .SRCINFO for {}", pkgbuild.display()))?;
        Ok(output.stdout().to_string())
    }

    /// Exports and parses `.SRCINFO` for `pkgbuild`.
    ///
    /// # Errors
    ///
    /// Returns an error if makepkg fails or its output is malformed.
    pub async fn srcinfo(&self, pkgbuild: &Path) -> Result<Srcinfo> {
        let text = self.print_srcinfo(pkgbuild).await?;
        Ok(Srcinfo::parse(&text)?)
    }

    /// Downloads and extracts sources without building.
    ///
    /// # Errors
    ///
    /// Returns an error if makepkg fails.
    pub async fn fetch_sources(&self, dir: &Path) -> Result<()> {
        self.command(dir)
            .args(["--nobuild", "--nodeps", "--holdver"])
            .run()
            .await
            .context("failed to fetch sources")?;
        Ok(())
    }

    /// Runs a build with `flags`. Output goes straight to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-zero exit.
    pub async fn build(&self, dir: &Path, flags: &[String]) -> Result<()> {
        info!(flags = %flags.join(" "), "makepkg");
        self.command(dir)
            .args(flags)
            .inherit_stdio()
            .run()
            .await
            .context("test build failed")?;
        Ok(())
    }

    /// Builds and installs the package in `dir`, syncing its dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-zero exit.
    pub async fn install_package(&self, dir: &Path) -> Result<()> {
        self.command(dir)
            .args(["--syncdeps", "--install", "--noconfirm", "--needed"])
            .inherit_stdio()
            .run()
            .await
            .with_context(|| format!("failed to build and install {}", dir.display()))?;
        Ok(())
    }
}

/// Rewrites the checksum arrays of the PKGBUILD in `dir`.
///
/// # Errors
///
/// Returns an error if updpkgsums fails.
pub async fn update_checksums(program: &Path, dir: &Path) -> Result<()> {
    ProcessBuilder::new(program)
        .name("updpkgsums")
        .cwd(dir)
        .run()
        .await
        .context("failed to update checksums")?;
    Ok(())
}
