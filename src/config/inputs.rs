// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Validation of raw publish inputs.
//!
//! ```text
//! PublishInputs (strings)
//!        |
//!        v
//! from_inputs()
//!   1. assets + assets_dir      --> Conflict
//!   2. commit identity          --> MissingInput
//!   3. boolean literals         --> InvalidValue
//!        |
//!        v
//! PublishOptions (typed)
//!   force_push stays raw until the publisher asks for it
//! ```

use bon::Builder;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::types::PublishInputs;
use crate::error::ConfigError;

/// Default descriptor file name.
pub const DEFAULT_PKGBUILD: &str = "PKGBUILD";

/// Flags passed to makepkg for the trial build when none are given.
pub const DEFAULT_TEST_FLAGS: [&str; 3] = ["--clean", "--cleanbuild", "--nodeps"];

/// Where files besides the descriptor come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AssetSource {
    /// Descriptor plus optional local sources and glob-matched files.
    Explicit { globs: Vec<String> },
    /// A directory whose included files become the target's file set.
    Mirror { dir: PathBuf },
}

impl Default for AssetSource {
    fn default() -> Self {
        Self::Explicit { globs: Vec::new() }
    }
}

/// Identity and message for the publish commit.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct CommitIdentity {
    pub username: String,
    pub email: String,
    pub message: String,
}

/// Validated publish options.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct PublishOptions {
    /// Explicit package name, overriding `.SRCINFO`.
    pub pkgname: Option<String>,
    /// Absolute path of the local descriptor.
    #[builder(into, default = PathBuf::from(DEFAULT_PKGBUILD))]
    pub pkgbuild: PathBuf,
    #[builder(default)]
    pub assets: AssetSource,
    #[builder(default)]
    pub use_source_files: bool,
    #[builder(default)]
    pub updpkgsums: bool,
    #[builder(default)]
    pub auto_detect_version: bool,
    #[builder(default)]
    pub reset_pkgrel: bool,
    #[builder(default)]
    pub test: bool,
    #[builder(default = default_test_flags())]
    pub test_flags: Vec<String>,
    #[builder(default)]
    pub auto_install_deps: bool,
    /// Absolute path of the pre-build hook.
    pub pre_build_hook: Option<PathBuf>,
    pub post_process: Option<String>,
    pub identity: CommitIdentity,
    #[builder(default)]
    pub allow_empty_commits: bool,
    /// Raw `force_push` value, parsed by [`Self::force_push`].
    pub force_push_raw: Option<String>,
    pub git_ssh_command: Option<String>,
}

fn default_test_flags() -> Vec<String> {
    DEFAULT_TEST_FLAGS.iter().map(ToString::to_string).collect()
}

/// Returns the value unless it is missing or blank.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Parses a literal `true`/`false` input. Unset inputs take `default`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for anything but the two literals.
pub fn parse_flag(key: &str, value: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected 'true' or 'false', got '{other}'"),
        }),
    }
}

fn require(key: &str, value: Option<&String>) -> Result<String, ConfigError> {
    present(value)
        .map(ToString::to_string)
        .ok_or_else(|| ConfigError::MissingInput {
            key: key.to_string(),
        })
}

fn flag(key: &str, value: Option<&String>) -> Result<bool, ConfigError> {
    parse_flag(key, value.map(String::as_str), false)
}

/// Resolves the asset inputs into a single source.
///
/// # Errors
///
/// Returns `ConfigError::Conflict` when both a glob list and a directory are set.
pub fn resolve_assets(inputs: &PublishInputs, workspace: &Path) -> Result<AssetSource, ConfigError> {
    let globs = present(inputs.assets.as_ref());
    let dir = present(inputs.assets_dir.as_ref());

    match (globs, dir) {
        (Some(_), Some(_)) => Err(ConfigError::Conflict {
            first: "assets".to_string(),
            second: "assets_dir".to_string(),
        }),
        (None, Some(dir)) => Ok(AssetSource::Mirror {
            dir: workspace.join(dir.trim()),
        }),
        (Some(globs), None) => Ok(AssetSource::Explicit {
            globs: globs.split_whitespace().map(ToString::to_string).collect(),
        }),
        (None, None) => Ok(AssetSource::default()),
    }
}

impl PublishOptions {
    /// Validates raw inputs. Relative paths resolve against `workspace`.
    ///
    /// Nothing outside this function touches the filesystem before it
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for conflicting asset inputs, a missing
    /// commit identity, or a boolean input that is not a literal.
    pub fn from_inputs(inputs: &PublishInputs, workspace: &Path) -> Result<Self, ConfigError> {
        let assets = resolve_assets(inputs, workspace)?;

        let identity = CommitIdentity {
            username: require("commit_username", inputs.commit_username.as_ref())?,
            email: require("commit_email", inputs.commit_email.as_ref())?,
            message: require("commit_message", inputs.commit_message.as_ref())?,
        };

        let test_flags = present(inputs.test_flags.as_ref()).map_or_else(default_test_flags, |f| {
            f.split_whitespace().map(ToString::to_string).collect()
        });

        Ok(Self {
            pkgname: present(inputs.pkgname.as_ref()).map(|n| n.trim().to_string()),
            pkgbuild: workspace.join(present(inputs.pkgbuild.as_ref()).unwrap_or(DEFAULT_PKGBUILD)),
            assets,
            use_source_files: flag("use_source_files", inputs.use_source_files.as_ref())?,
            updpkgsums: flag("updpkgsums", inputs.updpkgsums.as_ref())?,
            auto_detect_version: flag("auto_detect_version", inputs.auto_detect_version.as_ref())?,
            reset_pkgrel: flag("reset_pkgrel", inputs.reset_pkgrel.as_ref())?,
            test: flag("test", inputs.test.as_ref())?,
            test_flags,
            auto_install_deps: flag("auto_install_deps", inputs.auto_install_deps.as_ref())?,
            pre_build_hook: present(inputs.pre_build_hook.as_ref()).map(|h| workspace.join(h)),
            post_process: present(inputs.post_process.as_ref()).map(ToString::to_string),
            identity,
            allow_empty_commits: flag("allow_empty_commits", inputs.allow_empty_commits.as_ref())?,
            force_push_raw: inputs.force_push.clone(),
            git_ssh_command: present(inputs.git_ssh_command.as_ref()).map(ToString::to_string),
        })
    }

    /// Parses `force_push`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the value is not `true` or `false`.
    pub fn force_push(&self) -> Result<bool, ConfigError> {
        parse_flag("force_push", self.force_push_raw.as_deref(), false)
    }
}
