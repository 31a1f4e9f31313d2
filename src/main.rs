// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> ConfigLoader --> Logging --> Command Dispatch
//!                  aurpub.toml      [global]    Publish | Inspect
//!                  --config          + flags    Options | ConfigFiles
//!                  AURPUB_*                     Version
//!                  flags, INPUT_*
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::debug;

use aurpub::cli::{self, Cli, Command};
use aurpub::cmd::config::{run_config_files_command, run_options_command};
use aurpub::cmd::inspect::run_inspect_command;
use aurpub::cmd::publish::run_publish_command;
use aurpub::config::loader::ConfigLoader;
use aurpub::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use aurpub::error::Result;
use aurpub::logging::{LogConfig, init_logging, report_fatal};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = match build_config_loader(&cli) {
        Ok(loader) => loader,
        Err(e) => {
            report_fatal(&e);
            return ExitCode::FAILURE;
        }
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            report_fatal(&e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    for line in &loaded_files {
        debug!(source = %line, "loaded configuration");
    }

    match dispatch_command(&cli, &config, &loaded_files).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_fatal(&e);
            ExitCode::FAILURE
        }
    }
}

/// Layers, lowest precedence first: `aurpub.toml`, `--config` files,
/// `AURPUB_*`, then flags and `INPUT_*` variables.
fn build_config_loader(cli: &Cli) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !cli.global.no_local_config {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    loader = cli.global.apply(loader)?;
    if let Some(Command::Publish(args)) = &cli.command {
        loader = args.apply(loader)?;
    }
    Ok(loader)
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn workspace() -> Result<PathBuf> {
    std::env::current_dir().context("failed to determine the working directory")
}

async fn dispatch_command(cli: &Cli, config: &Config, loaded_files: &[String]) -> Result<()> {
    match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::ConfigFiles) => {
            run_config_files_command(loaded_files);
            Ok(())
        }
        Some(Command::Publish(_)) => run_publish_command(config, &workspace()?)
            .await
            .map(|_| ()),
        Some(Command::Inspect(args)) => run_inspect_command(args, config, &workspace()?).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("no command specified"))
        }
    }
}
