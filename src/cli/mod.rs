// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for aurpub using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! aurpub [global options] <command>
//! publish [--pkgname ...] [--assets ... | --assets-dir ...]   (INPUT_* env)
//! inspect [--pkgbuild PATH] [--json]
//! options
//! config-files
//! version
//! ```

pub mod global;
pub mod inspect;
pub mod publish;


use crate::cli::global::GlobalOptions;
use crate::cli::inspect::InspectArgs;
use crate::cli::publish::PublishArgs;
use clap::{Parser, Subcommand};

/// Publish PKGBUILDs to the Arch User Repository.
#[derive(Debug, Parser)]
#[command(
    name = "aurpub",
    author,
    version,
    about = "Publish PKGBUILDs to the Arch User Repository",
    long_about = "aurpub Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Synchronizes a PKGBUILD and its files into a clone of the\n\
                  package's AUR repository, optionally bumps the version and\n\
                  runs a test build, regenerates .SRCINFO, then commits and\n\
                  pushes. Every publish input can also be given as an\n\
                  INPUT_<NAME> environment variable, as GitHub Actions does.",
    after_help = "CONFIGURATION:\n\n\
                  aurpub reads `aurpub.toml` from the current directory if it\n\
                  exists, then every file given with --config, then AURPUB_*\n\
                  environment variables (AURPUB_REMOTE__BRANCH=main), then\n\
                  command-line flags and INPUT_* variables. Later sources win."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    ConfigFiles,

    /// Publishes a package to its remote repository.
    Publish(PublishArgs),

    /// Shows what aurpub resolves from a local PKGBUILD.
    Inspect(InspectArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
