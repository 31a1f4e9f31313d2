// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for aurpub.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. aurpub.toml (cwd, optional)
//! 3. --config FILE...
//! 4. AURPUB_* env vars
//! 5. CLI flags / INPUT_* env vars
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! AURPUB_PUBLISH__FORCE_PUSH=true        → publish.force_push = "true"
//! AURPUB_REMOTE__BRANCH=main             → remote.branch = "main"
//! AURPUB_GLOBAL__OUTPUT_LOG_LEVEL=4      → global.output_log_level = 4
//! ```

pub mod inputs;
pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, PublishInputs, RemoteConfig, ToolsConfig};

/// Name of the optional configuration file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "aurpub.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "AURPUB";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Raw publish inputs.
    pub publish: PublishInputs,
    /// Remote host settings.
    pub remote: RemoteConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aurpub::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("aurpub.toml")
    ///     .with_env_prefix("AURPUB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display.
    ///
    /// Unset publish inputs are shown empty. The commit email is replaced
    /// with `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_publish_options(&mut options);
        self.format_remote_options(&mut options);
        self.format_tools_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_publish_options(&self, options: &mut BTreeMap<String, String>) {
        let p = &self.publish;
        let entries = [
            ("pkgname", &p.pkgname),
            ("pkgbuild", &p.pkgbuild),
            ("assets", &p.assets),
            ("assets_dir", &p.assets_dir),
            ("use_source_files", &p.use_source_files),
            ("updpkgsums", &p.updpkgsums),
            ("auto_detect_version", &p.auto_detect_version),
            ("reset_pkgrel", &p.reset_pkgrel),
            ("test", &p.test),
            ("test_flags", &p.test_flags),
            ("auto_install_deps", &p.auto_install_deps),
            ("pre_build_hook", &p.pre_build_hook),
            ("post_process", &p.post_process),
            ("commit_username", &p.commit_username),
            ("commit_message", &p.commit_message),
            ("allow_empty_commits", &p.allow_empty_commits),
            ("force_push", &p.force_push),
            ("git_ssh_command", &p.git_ssh_command),
        ];
        for (key, value) in entries {
            options.insert(
                format!("publish.{key}"),
                value.clone().unwrap_or_default(),
            );
        }
        if p.commit_email.as_deref().is_some_and(|e| !e.is_empty()) {
            options.insert("publish.commit_email".into(), "[hidden]".into());
        }
    }

    fn format_remote_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "remote.clone_url_template".into(),
            self.remote.clone_url_template.clone(),
        );
        options.insert(
            "remote.push_url_template".into(),
            self.remote.push_url_template.clone(),
        );
        options.insert("remote.push_remote".into(), self.remote.push_remote.clone());
        options.insert("remote.branch".into(), self.remote.branch.clone());
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        let t = &self.tools;
        for (key, path) in [
            ("git", &t.git),
            ("makepkg", &t.makepkg),
            ("pacman", &t.pacman),
            ("updpkgsums", &t.updpkgsums),
            ("sudo", &t.sudo),
            ("bash", &t.bash),
        ] {
            options.insert(format!("tools.{key}"), path.display().to_string());
        }
    }
}
