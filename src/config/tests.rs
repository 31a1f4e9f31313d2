// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::inputs::{AssetSource, DEFAULT_TEST_FLAGS, PublishOptions, parse_flag};
use super::types::PublishInputs;
use super::{Config, ConfigLoader};
use crate::error::ConfigError;
use crate::logging::LogLevel;

fn identity_inputs() -> PublishInputs {
    PublishInputs {
        commit_username: Some("ci-bot".to_string()),
        commit_email: Some("ci@example.org".to_string()),
        commit_message: Some("Update package".to_string()),
        ..PublishInputs::default()
    }
}

fn workspace() -> &'static Path {
    Path::new("/work")
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.remote.branch, "master");
    assert_eq!(config.remote.push_remote, "aur");
    assert_eq!(config.tools.makepkg, PathBuf::from("makepkg"));
    assert!(config.publish.pkgname.is_none());
}

#[test]
fn test_remote_url_templates() {
    let config = Config::default();
    insta::assert_snapshot!(config.remote.clone_url("foo"), @"https://aur.archlinux.org/foo.git");
    insta::assert_snapshot!(config.remote.push_url("foo"), @"ssh://aur@aur.archlinux.org/foo.git");
}

#[test]
fn test_parse_sections() {
    let config = Config::parse(
        r#"
        [global]
        output_log_level = 4

        [publish]
        pkgname = "foo"
        force_push = "true"

        [remote]
        branch = "main"

        [tools]
        sudo = "/usr/bin/doas"
        "#,
    )
    .expect("valid config");

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.publish.pkgname.as_deref(), Some("foo"));
    assert_eq!(config.publish.force_push.as_deref(), Some("true"));
    assert_eq!(config.remote.branch, "main");
    assert_eq!(config.remote.push_remote, "aur");
    assert_eq!(config.tools.sudo, PathBuf::from("/usr/bin/doas"));
}

#[test]
fn test_unknown_key_rejected() {
    let err = Config::parse("[publish]\nnot_an_input = \"x\"").expect_err("unknown key");
    assert!(format!("{err:#}").contains("not_an_input"));
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(Config::parse("[global]\noutput_log_level = 9").is_err());
}

#[test]
fn test_config_loader_invalid_toml() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    let result = ConfigLoader::new().add_toml_file(file.path()).build();
    assert!(result.is_err(), "build should fail with invalid TOML");
}

#[test]
fn test_config_loader_missing_required_file() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/aurpub.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_optional_file_absent() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/aurpub.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_loader_file_order() {
    let mut first = NamedTempFile::new().expect("temp file");
    writeln!(first, "[remote]\nbranch = \"first\"").expect("write");
    let mut second = NamedTempFile::new().expect("temp file");
    writeln!(second, "[remote]\nbranch = \"second\"").expect("write");

    let loader = ConfigLoader::new()
        .add_toml_file(first.path())
        .add_toml_file(second.path());
    assert_eq!(loader.format_loaded_files().len(), 2);

    let config = loader.build().expect("build");
    assert_eq!(config.remote.branch, "second");
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("AURPUBTEST_PUBLISH__FORCE_PUSH", "true");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[publish]\nforce_push = \"false\"")
        .with_env_prefix("AURPUBTEST")
        .build()
        .expect("build should succeed");

    assert_eq!(config.publish.force_push.as_deref(), Some("true"));

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("AURPUBTEST_PUBLISH__FORCE_PUSH");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[publish]\npkgname = \"from-file\"")
        .set("publish.pkgname", "from-cli")
        .expect("set should succeed")
        .set_opt::<String>("publish.pkgbuild", None)
        .expect("unset is a no-op")
        .build()
        .expect("build");

    assert_eq!(config.publish.pkgname.as_deref(), Some("from-cli"));
    assert!(config.publish.pkgbuild.is_none());
}

#[test]
fn test_format_options_hides_email() {
    let config = Config {
        publish: identity_inputs(),
        ..Config::default()
    };
    let options = config.format_options();

    let email = options
        .iter()
        .find(|line| line.starts_with("publish.commit_email"))
        .expect("email line");
    assert!(email.ends_with("= [hidden]"));
    assert!(!options.iter().any(|line| line.contains("ci@example.org")));
    assert!(options.iter().any(|line| line.starts_with("tools.makepkg")));
}

#[test]
fn test_parse_flag_literals() {
    assert_eq!(parse_flag("test", Some("true"), false).ok(), Some(true));
    assert_eq!(parse_flag("test", Some("false"), true).ok(), Some(false));
    assert_eq!(parse_flag("test", None, true).ok(), Some(true));
    assert_eq!(parse_flag("test", Some(""), false).ok(), Some(false));

    let err = parse_flag("test", Some("yes"), false).expect_err("not a literal");
    insta::assert_snapshot!(err, @"invalid value for 'test': expected 'true' or 'false', got 'yes'");
    assert!(parse_flag("test", Some("True"), false).is_err());
}

#[test]
fn test_inputs_conflicting_assets() {
    let inputs = PublishInputs {
        assets: Some("*.patch".to_string()),
        assets_dir: Some("aur".to_string()),
        ..identity_inputs()
    };
    let err = PublishOptions::from_inputs(&inputs, workspace()).expect_err("conflict");
    assert!(matches!(err, ConfigError::Conflict { .. }));
}

#[test]
fn test_inputs_conflict_checked_before_identity() {
    let inputs = PublishInputs {
        assets: Some("*.patch".to_string()),
        assets_dir: Some("aur".to_string()),
        ..PublishInputs::default()
    };
    let err = PublishOptions::from_inputs(&inputs, workspace()).expect_err("conflict");
    assert!(matches!(err, ConfigError::Conflict { .. }));
}

#[test]
fn test_inputs_missing_identity() {
    let inputs = PublishInputs {
        commit_email: Some(String::new()),
        ..identity_inputs()
    };
    let err = PublishOptions::from_inputs(&inputs, workspace()).expect_err("missing email");
    insta::assert_snapshot!(err, @"missing required input 'commit_email'");
}

#[test]
fn test_inputs_invalid_flag() {
    let inputs = PublishInputs {
        test: Some("1".to_string()),
        ..identity_inputs()
    };
    let err = PublishOptions::from_inputs(&inputs, workspace()).expect_err("bad flag");
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "test"));
}

#[test]
fn test_inputs_defaults() {
    let options = PublishOptions::from_inputs(&identity_inputs(), workspace()).expect("valid");

    assert_eq!(options.pkgbuild, PathBuf::from("/work/PKGBUILD"));
    assert_eq!(options.assets, AssetSource::Explicit { globs: Vec::new() });
    assert_eq!(options.test_flags, DEFAULT_TEST_FLAGS);
    assert!(!options.test);
    assert!(!options.allow_empty_commits);
    assert_eq!(options.force_push().ok(), Some(false));
    assert!(options.pre_build_hook.is_none());
}

#[test]
fn test_inputs_resolution() {
    let inputs = PublishInputs {
        pkgname: Some(" foo ".to_string()),
        pkgbuild: Some("pkg/PKGBUILD".to_string()),
        assets: Some("*.patch\nfoo.install  extra/*.desktop".to_string()),
        test_flags: Some("--nocheck  --nodeps".to_string()),
        pre_build_hook: Some("ci/hook.sh".to_string()),
        test: Some("true".to_string()),
        ..identity_inputs()
    };
    let options = PublishOptions::from_inputs(&inputs, workspace()).expect("valid");

    assert_eq!(options.pkgname.as_deref(), Some("foo"));
    assert_eq!(options.pkgbuild, PathBuf::from("/work/pkg/PKGBUILD"));
    assert_eq!(
        options.assets,
        AssetSource::Explicit {
            globs: vec![
                "*.patch".to_string(),
                "foo.install".to_string(),
                "extra/*.desktop".to_string()
            ]
        }
    );
    assert_eq!(options.test_flags, ["--nocheck", "--nodeps"]);
    assert_eq!(options.pre_build_hook, Some(PathBuf::from("/work/ci/hook.sh")));
    assert!(options.test);
}

#[test]
fn test_inputs_mirror_dir() {
    let inputs = PublishInputs {
        assets: Some("   ".to_string()),
        assets_dir: Some("aur/foo".to_string()),
        ..identity_inputs()
    };
    let options = PublishOptions::from_inputs(&inputs, workspace()).expect("valid");
    assert_eq!(
        options.assets,
        AssetSource::Mirror {
            dir: PathBuf::from("/work/aur/foo")
        }
    );
}

#[test]
fn test_force_push_parsed_at_first_use() {
    let inputs = PublishInputs {
        force_push: Some("maybe".to_string()),
        ..identity_inputs()
    };
    let options = PublishOptions::from_inputs(&inputs, workspace()).expect("not validated yet");
    let err = options.force_push().expect_err("invalid literal");
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "force_push"));
}
