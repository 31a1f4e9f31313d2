// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wrappers around the external tools a publish run drives.
//!
//! ```text
//! PipelineContext --> ToolContext --> ProcessBuilder
//!                       makepkg   --printsrcinfo | --nobuild | build | --install
//!                       updpkgsums
//!                       pacman    PackageInstaller (-T | -Sy | -S | remote build)
//!                       git       ShellBackend
//! ```

pub mod makepkg;
pub mod pacman;

#[cfg(test)]
pub(crate) mod test_utils;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::inputs::PublishOptions;
use crate::config::types::ToolsConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::git::ShellBackend;

pub use makepkg::Makepkg;
pub use pacman::{PackageInstaller, Pacman};

/// Resolved tool locations for one run.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    tools: ToolsConfig,
}

impl ToolContext {
    #[must_use]
    pub const fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    #[must_use]
    pub const fn config(&self) -> &ToolsConfig {
        &self.tools
    }

    #[must_use]
    pub fn makepkg(&self) -> Makepkg {
        Makepkg::new(&self.tools.makepkg)
    }

    /// A git backend for clone and push, with an optional `GIT_SSH_COMMAND`.
    #[must_use]
    pub fn git(&self, ssh_command: Option<String>) -> ShellBackend {
        ShellBackend::new(&self.tools.git).with_ssh_command(ssh_command)
    }

    /// Checks that each program is an executable on PATH, or an existing
    /// executable path.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` for the first missing program.
    pub fn preflight<'a, I>(&self, programs: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for program in programs {
            let resolved = ProcessBuilder::which(&program.to_string_lossy())?;
            debug!(tool = %program.display(), path = %resolved.program().display(), "found");
        }
        Ok(())
    }

    /// Programs a run with `options` will execute.
    ///
    /// bash is needed for `pkgver()` and for the pre-build hook, which only
    /// runs as part of a trial build.
    #[must_use]
    pub fn required_programs(&self, options: &PublishOptions) -> Vec<&Path> {
        let mut programs = vec![self.tools.git.as_path(), self.tools.makepkg.as_path()];
        if options.auto_install_deps {
            programs.push(&self.tools.pacman);
            if let Some(sudo) = self.sudo() {
                programs.push(sudo);
            }
        }
        if options.updpkgsums {
            programs.push(&self.tools.updpkgsums);
        }
        if options.auto_detect_version || (options.test && options.pre_build_hook.is_some()) {
            programs.push(&self.tools.bash);
        }
        programs
    }

    /// The privilege wrapper, unless configured empty.
    #[must_use]
    pub fn sudo(&self) -> Option<&Path> {
        let sudo = self.tools.sudo.as_path();
        (!sudo.as_os_str().is_empty()).then_some(sudo)
    }

    #[must_use]
    pub fn bash(&self) -> PathBuf {
        self.tools.bash.clone()
    }
}
