// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config
//!   [global]   log levels, log file
//!   [publish]  raw string inputs (empty string = unset)
//!   [remote]   clone/push URL templates, push remote, branch
//!   [tools]    git, makepkg, pacman, updpkgsums, sudo, bash
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Placeholder substituted with the package name in URL templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file. No file layer when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Publish inputs exactly as received.
///
/// Every value is a string because the same keys arrive from TOML,
/// `AURPUB_*` variables, CLI flags, and `INPUT_*` variables. Validation
/// happens in [`super::inputs::PublishOptions::from_inputs`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishInputs {
    pub pkgname: Option<String>,
    pub pkgbuild: Option<String>,
    pub assets: Option<String>,
    pub assets_dir: Option<String>,
    pub use_source_files: Option<String>,
    pub updpkgsums: Option<String>,
    pub auto_detect_version: Option<String>,
    pub reset_pkgrel: Option<String>,
    pub test: Option<String>,
    pub test_flags: Option<String>,
    pub auto_install_deps: Option<String>,
    pub pre_build_hook: Option<String>,
    pub post_process: Option<String>,
    pub commit_username: Option<String>,
    pub commit_email: Option<String>,
    pub commit_message: Option<String>,
    pub allow_empty_commits: Option<String>,
    pub force_push: Option<String>,
    pub git_ssh_command: Option<String>,
}

/// Remote repository host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Clone URL, `{name}` is replaced with the package name.
    pub clone_url_template: String,
    /// Push URL, `{name}` is replaced with the package name.
    pub push_url_template: String,
    /// Name of the remote added for pushing.
    pub push_remote: String,
    /// Branch to push.
    pub branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            clone_url_template: "https://aur.archlinux.org/{name}.git".to_string(),
            push_url_template: "ssh://aur@aur.archlinux.org/{name}.git".to_string(),
            push_remote: "aur".to_string(),
            branch: "master".to_string(),
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn clone_url(&self, name: &str) -> String {
        self.clone_url_template.replace(NAME_PLACEHOLDER, name)
    }

    #[must_use]
    pub fn push_url(&self, name: &str) -> String {
        self.push_url_template.replace(NAME_PLACEHOLDER, name)
    }
}

/// Tool paths configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: PathBuf,
    pub makepkg: PathBuf,
    pub pacman: PathBuf,
    pub updpkgsums: PathBuf,
    /// Privilege escalation wrapper for pacman installs.
    pub sudo: PathBuf,
    /// Interpreter for hooks and `pkgver()`.
    pub bash: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            makepkg: PathBuf::from("makepkg"),
            pacman: PathBuf::from("pacman"),
            updpkgsums: PathBuf::from("updpkgsums"),
            sudo: PathBuf::from("sudo"),
            bash: PathBuf::from("bash"),
        }
    }
}
