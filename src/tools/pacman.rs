// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! System package installation.
//!
//! ```text
//! PackageInstaller (trait)
//!   refresh_database()   sudo pacman -Sy --noconfirm
//!   is_satisfied(name)   pacman -T name         0 = yes, 127 = no
//!   install_from_repos   sudo pacman -S --needed --noconfirm name
//!   build_from_remote    git clone <clone_url> && makepkg -si
//! ```

use std::path::PathBuf;

use anyhow::Context;
use bon::Builder;
use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use super::makepkg::Makepkg;
use crate::config::types::RemoteConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::git::ShellBackend;

/// `pacman -T` exit code for a dependency that is not satisfied.
const PACMAN_T_MISSING: i32 = 127;

/// Backend used by dependency resolution.
pub trait PackageInstaller: Send + Sync {
    /// Syncs the package databases.
    fn refresh_database(&self) -> BoxFuture<'_, Result<()>>;

    /// Whether `name` is already provided by an installed package.
    fn is_satisfied<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<bool>>;

    /// Installs `name` from the configured repositories.
    fn install_from_repos<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Builds and installs `name` from its package repository on the remote host.
    ///
    /// Resolves to `false` when the remote has no PKGBUILD for `name`.
    fn build_from_remote<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<bool>>;
}

/// [`PackageInstaller`] backed by pacman and the remote host.
#[derive(Debug, Clone, Builder)]
pub struct Pacman {
    #[builder(into, default = PathBuf::from("pacman"))]
    pacman: PathBuf,
    /// Privilege wrapper. `None` runs pacman directly.
    #[builder(into)]
    sudo: Option<PathBuf>,
    #[builder(default)]
    makepkg: Makepkg,
    #[builder(default)]
    git: ShellBackend,
    #[builder(default)]
    remote: RemoteConfig,
}

impl Pacman {
    fn privileged(&self) -> ProcessBuilder {
        let builder = match &self.sudo {
            Some(sudo) => ProcessBuilder::new(sudo).arg(&self.pacman),
            None => ProcessBuilder::new(&self.pacman),
        };
        builder.name("pacman")
    }

    async fn is_satisfied_impl(&self, name: &str) -> Result<bool> {
        let output = ProcessBuilder::new(&self.pacman)
            .name("pacman")
            .args(["-T", name])
            .capture_output()
            .success_codes([0, PACMAN_T_MISSING])
            .run()
            .await?;
        Ok(output.success())
    }

    async fn build_from_remote_impl(&self, name: &str) -> Result<bool> {
        let scratch = tempfile::Builder::new()
            .prefix("aurpub-dep-")
            .tempdir()
            .context("failed to create build directory")?;
        let dir = scratch.path().join(name);
        let url = self.remote.clone_url(name);

        if let Err(e) = self.git.clone_repo(&url, &dir).await {
            warn!(dependency = name, error = %e, "clone failed");
            return Ok(false);
        }
        if !dir.join("PKGBUILD").is_file() {
            debug!(dependency = name, url, "no PKGBUILD in remote repository");
            return Ok(false);
        }

        self.makepkg.install_package(&dir).await?;
        Ok(true)
    }
}

impl PackageInstaller for Pacman {
    fn refresh_database(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.privileged()
                .args(["-Sy", "--noconfirm"])
                .run()
                .await?;
            Ok(())
        })
    }

    fn is_satisfied<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<bool>> {
        Box::pin(self.is_satisfied_impl(name))
    }

    fn install_from_repos<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.privileged()
                .args(["-S", "--needed", "--noconfirm", name])
                .run()
                .await
                .with_context(|| format!("pacman could not install '{name}'"))?;
            Ok(())
        })
    }

    fn build_from_remote<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<bool>> {
        Box::pin(self.build_from_remote_impl(name))
    }
}
