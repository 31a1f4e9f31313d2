// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command arguments.
//!
//! Every flag doubles as an `INPUT_<NAME>` environment variable so the
//! binary runs unchanged as a GitHub Action step. Values stay strings here
//! and are validated together with the TOML and `AURPUB_*` layers.

use clap::Args;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Arguments for the publish command.
#[derive(Debug, Clone, Default, Args)]
pub struct PublishArgs {
    /// Package name, overriding the one in .SRCINFO
    #[arg(long, env = "INPUT_PKGNAME", value_name = "NAME")]
    pub pkgname: Option<String>,

    /// Path of the PKGBUILD, relative to the workspace
    #[arg(long, env = "INPUT_PKGBUILD", value_name = "PATH")]
    pub pkgbuild: Option<String>,

    /// Newline-separated globs of extra files to publish
    #[arg(long, env = "INPUT_ASSETS", value_name = "GLOBS")]
    pub assets: Option<String>,

    /// Directory mirrored into the package repository
    #[arg(long, env = "INPUT_ASSETS_DIR", value_name = "DIR")]
    pub assets_dir: Option<String>,

    /// Also publish local files named in source=() (true/false)
    #[arg(long, env = "INPUT_USE_SOURCE_FILES", value_name = "BOOL")]
    pub use_source_files: Option<String>,

    /// Update checksums with updpkgsums (true/false)
    #[arg(long, env = "INPUT_UPDPKGSUMS", value_name = "BOOL")]
    pub updpkgsums: Option<String>,

    /// Detect pkgver from sources and rewrite the PKGBUILD (true/false)
    #[arg(long, env = "INPUT_AUTO_DETECT_VERSION", value_name = "BOOL")]
    pub auto_detect_version: Option<String>,

    /// Reset pkgrel to 1 on a version bump (true/false)
    #[arg(long, env = "INPUT_RESET_PKGREL", value_name = "BOOL")]
    pub reset_pkgrel: Option<String>,

    /// Run a trial build before publishing (true/false)
    #[arg(long, env = "INPUT_TEST", value_name = "BOOL")]
    pub test: Option<String>,

    /// Space-separated makepkg flags for the trial build
    #[arg(long, env = "INPUT_TEST_FLAGS", value_name = "FLAGS", allow_hyphen_values = true)]
    pub test_flags: Option<String>,

    /// Install dependencies before building (true/false)
    #[arg(long, env = "INPUT_AUTO_INSTALL_DEPS", value_name = "BOOL")]
    pub auto_install_deps: Option<String>,

    /// Script run in the package repository before the trial build
    #[arg(long, env = "INPUT_PRE_BUILD_HOOK", value_name = "PATH")]
    pub pre_build_hook: Option<String>,

    /// Shell command run in the package repository before committing
    #[arg(long, env = "INPUT_POST_PROCESS", value_name = "COMMAND", allow_hyphen_values = true)]
    pub post_process: Option<String>,

    /// Commit author name
    #[arg(long, env = "INPUT_COMMIT_USERNAME", value_name = "NAME")]
    pub commit_username: Option<String>,

    /// Commit author email
    #[arg(long, env = "INPUT_COMMIT_EMAIL", value_name = "EMAIL")]
    pub commit_email: Option<String>,

    /// Commit message
    #[arg(long, env = "INPUT_COMMIT_MESSAGE", value_name = "MESSAGE")]
    pub commit_message: Option<String>,

    /// Commit even when nothing changed (true/false)
    #[arg(long, env = "INPUT_ALLOW_EMPTY_COMMITS", value_name = "BOOL")]
    pub allow_empty_commits: Option<String>,

    /// Force push (true/false)
    #[arg(long, env = "INPUT_FORCE_PUSH", value_name = "BOOL")]
    pub force_push: Option<String>,

    /// Value for GIT_SSH_COMMAND on remote git operations
    #[arg(long, env = "INPUT_GIT_SSH_COMMAND", value_name = "COMMAND")]
    pub git_ssh_command: Option<String>,
}

impl PublishArgs {
    /// `(key, value)` for every flag given with a non-empty value.
    ///
    /// Actions runners export every declared input, unset ones as empty
    /// strings; those must not shadow lower configuration layers.
    #[must_use]
    pub fn overrides(&self) -> Vec<(&'static str, &str)> {
        [
            ("pkgname", &self.pkgname),
            ("pkgbuild", &self.pkgbuild),
            ("assets", &self.assets),
            ("assets_dir", &self.assets_dir),
            ("use_source_files", &self.use_source_files),
            ("updpkgsums", &self.updpkgsums),
            ("auto_detect_version", &self.auto_detect_version),
            ("reset_pkgrel", &self.reset_pkgrel),
            ("test", &self.test),
            ("test_flags", &self.test_flags),
            ("auto_install_deps", &self.auto_install_deps),
            ("pre_build_hook", &self.pre_build_hook),
            ("post_process", &self.post_process),
            ("commit_username", &self.commit_username),
            ("commit_email", &self.commit_email),
            ("commit_message", &self.commit_message),
            ("allow_empty_commits", &self.allow_empty_commits),
            ("force_push", &self.force_push),
            ("git_ssh_command", &self.git_ssh_command),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Applies the given flags as `[publish]` overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if an override is rejected.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        self.overrides()
            .into_iter()
            .try_fold(loader, |loader, (key, value)| {
                loader.set(&format!("publish.{key}"), value)
            })
    }
}
