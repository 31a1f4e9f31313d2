// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end publish runs against local bare remotes.
//!
//! makepkg is replaced by a bash script; git is real.

mod common;

use std::path::Path;

use aurpub::config::Config;
use aurpub::error::ConfigError;
use aurpub::pipeline::publish::CommitOutcome;
use aurpub::pipeline::run_pipeline;

use common::{bare_remote, commit_count, fake_makepkg, git, init_repo, remote_files, temp_dir, write_file};

const PKGBUILD: &str = "\
pkgname=foo
pkgver=1.0
pkgrel=1
source=(\"foo.patch\" \"https://example.org/foo-1.0.tar.gz\")
";

/// Config pointing every URL template at `<root>/{name}.git`.
fn config(root: &Path) -> Config {
    let mut config = Config::default();
    let template = format!("{}/{{name}}.git", root.display());
    config.remote.clone_url_template = template.clone();
    config.remote.push_url_template = template;
    config.tools.makepkg = fake_makepkg(&root.join("bin"));
    config.publish.commit_username = Some("Test".to_string());
    config.publish.commit_email = Some("test@example.com".to_string());
    config.publish.commit_message = Some("Update foo".to_string());
    config
}

#[tokio::test]
async fn publish_explicit_then_rerun_is_idempotent() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(root, "foo", &[("README", "seed\n")]);
    let ws = root.join("ws");
    write_file(&ws, "PKGBUILD", PKGBUILD);
    write_file(&ws, "foo.patch", "--- a\n+++ b\n");

    let mut config = config(root);
    config.publish.use_source_files = Some("true".to_string());

    let first = run_pipeline(&config, &ws).await.expect("first publish");
    assert_eq!(first.name, "foo");
    assert_eq!(first.version, "1.0-1");
    assert_eq!(first.commit, CommitOutcome::Created);
    assert_eq!(
        remote_files(&bare),
        [".SRCINFO", "PKGBUILD", "README", "foo.patch"]
    );
    assert_eq!(
        git(&bare, &["show", "master:.SRCINFO"]),
        "pkgbase = foo\n\tpkgver = 1.0\n\tpkgrel = 1\n\tsource = foo.patch\n\tsource = https://example.org/foo-1.0.tar.gz\n\npkgname = foo"
    );
    assert_eq!(
        git(&bare, &["log", "-1", "--format=%an <%ae> %s", "master"]),
        "Test <test@example.com> Update foo"
    );
    assert_eq!(commit_count(&bare), 2);

    let second = run_pipeline(&config, &ws).await.expect("second publish");
    assert_eq!(second.commit, CommitOutcome::Skipped);
    assert_eq!(commit_count(&bare), 2);
}

#[tokio::test]
async fn publish_conflicting_assets_aborts_before_cloning() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(root, "foo", &[("README", "seed\n")]);
    let ws = root.join("ws");
    write_file(&ws, "PKGBUILD", PKGBUILD);

    let mut config = config(root);
    config.publish.assets = Some("*.patch".to_string());
    config.publish.assets_dir = Some("pkg".to_string());

    let err = run_pipeline(&config, &ws).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Conflict { .. })
    ));
    assert_eq!(commit_count(&bare), 1);
    assert!(!root.join("bin").join("makepkg.log").exists());
}

#[tokio::test]
async fn publish_rejects_non_literal_boolean() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(root, "foo", &[]);
    let ws = root.join("ws");
    write_file(&ws, "PKGBUILD", PKGBUILD);

    let mut config = config(root);
    config.publish.test = Some("yes".to_string());

    let err = run_pipeline(&config, &ws).await.unwrap_err();
    insta::assert_snapshot!(format!("{err:#}"), @"Validating inputs failed: invalid value for 'test': expected 'true' or 'false', got 'yes'");
    assert_eq!(commit_count(&bare), 1);
}

#[tokio::test]
async fn publish_mirror_with_trial_build() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(
        root,
        "foo",
        &[("PKGBUILD", "pkgname=foo\n"), ("old.txt", "stale\n")],
    );
    let ws = root.join("ws");
    let pkg = ws.join("pkg");
    init_repo(&pkg);
    write_file(&pkg, "PKGBUILD", "pkgname=foo\npkgver=1.0\npkgrel=2\n");
    write_file(&pkg, ".gitignore", "build.log\n");
    write_file(&pkg, "build.log", "noise\n");
    write_file(&pkg, "helper.sh", "echo helper\n");

    let hook_out = root.join("hook.out");
    write_file(
        &ws,
        "hooks/prepare.sh",
        &format!("echo ran > '{}'\n", hook_out.display()),
    );

    let mut config = config(root);
    config.publish.assets_dir = Some("pkg".to_string());
    config.publish.pkgbuild = Some("pkg/PKGBUILD".to_string());
    config.publish.test = Some("true".to_string());
    config.publish.pre_build_hook = Some("hooks/prepare.sh".to_string());

    let summary = run_pipeline(&config, &ws).await.expect("publish");
    assert_eq!(summary.version, "1.0-2");
    assert_eq!(summary.commit, CommitOutcome::Created);
    assert_eq!(
        remote_files(&bare),
        [".SRCINFO", ".gitignore", "PKGBUILD", "helper.sh"]
    );
    assert_eq!(std::fs::read_to_string(&hook_out).expect("hook ran"), "ran\n");
    assert_eq!(
        std::fs::read_to_string(root.join("bin").join("makepkg.log")).expect("makepkg log"),
        "--clean --cleanbuild --nodeps\n"
    );
}

#[tokio::test]
async fn publish_mirror_keeps_build_output_out_of_the_commit() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(root, "foo", &[("PKGBUILD", "pkgname=foo\n")]);
    let ws = root.join("ws");
    let pkg = ws.join("pkg");
    write_file(
        &pkg,
        "PKGBUILD",
        "pkgname=foo\npkgver=1.0\npkgrel=2\nsource=(a.patch)\npkgver() {\n  [ -f main.c ] && echo 1.0\n}\n",
    );
    write_file(&pkg, "a.patch", "--- a\n+++ b\n");

    let mut config = config(root);
    config.publish.assets_dir = Some("pkg".to_string());
    config.publish.pkgbuild = Some("pkg/PKGBUILD".to_string());
    config.publish.auto_detect_version = Some("true".to_string());
    config.publish.test = Some("true".to_string());

    let summary = run_pipeline(&config, &ws).await.expect("publish");
    assert_eq!(summary.version, "1.0-2");
    assert_eq!(
        std::fs::read_to_string(root.join("bin").join("makepkg.log")).expect("makepkg log"),
        "--nobuild --nodeps --holdver\n--clean --cleanbuild --nodeps\n"
    );
    assert_eq!(remote_files(&bare), [".SRCINFO", "PKGBUILD", "a.patch"]);
    let mut local: Vec<_> = std::fs::read_dir(&pkg)
        .expect("read pkg")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    local.sort();
    assert_eq!(local, ["PKGBUILD", "a.patch"]);
}

#[tokio::test]
async fn publish_bumps_version_from_pkgver_function() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(root, "foo", &[]);
    let ws = root.join("ws");
    write_file(
        &ws,
        "PKGBUILD",
        "pkgname=foo\npkgver=1.0\npkgrel=3\npkgver() {\n  [ -f main.c ] && echo 2.0\n}\n",
    );

    let mut config = config(root);
    config.publish.auto_detect_version = Some("true".to_string());
    config.publish.reset_pkgrel = Some("true".to_string());

    let summary = run_pipeline(&config, &ws).await.expect("publish");
    assert_eq!(summary.version, "2.0-1");
    assert_eq!(
        git(&bare, &["show", "master:PKGBUILD"]),
        "pkgname=foo\npkgver=2.0\npkgrel=1\npkgver() {\n  [ -f main.c ] && echo 2.0\n}"
    );
    assert_eq!(remote_files(&bare), [".SRCINFO", "PKGBUILD"]);
    // the workspace copy is left alone
    assert!(
        std::fs::read_to_string(ws.join("PKGBUILD"))
            .expect("read")
            .contains("pkgver=1.0")
    );
}
