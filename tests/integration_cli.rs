// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use aurpub::cli::{Cli, Command};
use clap::{CommandFactory, Parser};

// =============================================================================
// Definition
// =============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["aurpub", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_unknown_command_is_error() {
    assert!(Cli::try_parse_from(["aurpub", "release"]).is_err());
}

// =============================================================================
// Publish Command
// =============================================================================

#[test]
fn cli_publish_every_input() {
    let cli = Cli::try_parse_from([
        "aurpub",
        "--log-level",
        "2",
        "publish",
        "--pkgname",
        "foo",
        "--pkgbuild",
        "pkg/PKGBUILD",
        "--assets",
        "*.patch\nLICENSE",
        "--use-source-files",
        "true",
        "--updpkgsums",
        "false",
        "--auto-detect-version",
        "true",
        "--reset-pkgrel",
        "true",
        "--test",
        "true",
        "--test-flags",
        "--nocheck",
        "--auto-install-deps",
        "true",
        "--pre-build-hook",
        "ci/hook.sh",
        "--post-process",
        "git status",
        "--commit-username",
        "bot",
        "--commit-email",
        "bot@example.com",
        "--commit-message",
        "Release",
        "--allow-empty-commits",
        "false",
        "--force-push",
        "false",
        "--git-ssh-command",
        "ssh -i key",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(2));
    let Some(Command::Publish(args)) = cli.command else {
        panic!("expected publish");
    };
    let keys: Vec<_> = args.overrides().into_iter().map(|(key, _)| key).collect();
    insta::assert_snapshot!(keys.join(","), @"pkgname,pkgbuild,assets,use_source_files,updpkgsums,auto_detect_version,reset_pkgrel,test,test_flags,auto_install_deps,pre_build_hook,post_process,commit_username,commit_email,commit_message,allow_empty_commits,force_push,git_ssh_command");
}

#[test]
fn cli_publish_both_asset_inputs_parse() {
    // the conflict is reported by input validation, not by clap
    let cli = Cli::try_parse_from(["aurpub", "publish", "--assets", "*.patch", "--assets-dir", "pkg"]);
    assert!(cli.is_ok());
}

// =============================================================================
// Inspect Command
// =============================================================================

#[test]
fn cli_inspect_defaults() {
    let cli = Cli::try_parse_from(["aurpub", "inspect"]).unwrap();
    let Some(Command::Inspect(args)) = cli.command else {
        panic!("expected inspect");
    };
    assert!(args.pkgbuild.is_none());
    assert!(!args.json);
}

#[test]
fn cli_config_commands() {
    let cli = Cli::try_parse_from(["aurpub", "--no-local-config", "config-files"]).unwrap();
    assert!(cli.global.no_local_config);
    assert!(matches!(cli.command, Some(Command::ConfigFiles)));
}
