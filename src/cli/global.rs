// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! ```text
//! --config FILE      additional TOML files (can repeat)
//! --no-local-config  skip ./aurpub.toml
//! --log-level N      console verbosity (0-5)
//! --file-log-level N file verbosity (defaults to --log-level)
//! --log-file FILE    enable the file layer
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Does not load `aurpub.toml` from the current directory.
    #[arg(long = "no-local-config")]
    pub no_local_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Applies the logging flags as `[global]` overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if an override is rejected.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        loader
            .set_opt("global.output_log_level", self.log_level.map(i64::from))?
            .set_opt(
                "global.file_log_level",
                self.file_log_level.or(self.log_level).map(i64::from),
            )?
            .set_opt(
                "global.log_file",
                self.log_file.as_ref().map(|p| p.display().to_string()),
            )
    }
}
