// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for remote clones and pushes.
//!
//! Tests the git layer with real temporary repositories.

mod common;

use std::path::Path;

use aurpub::config::types::RemoteConfig;
use aurpub::error::GitError;
use aurpub::git::{ShellBackend, query};
use aurpub::pipeline::RemoteRepository;

use common::{bare_remote, commit_count, git, temp_dir, write_file};

fn remote_config(root: &Path, push_remote: &str) -> RemoteConfig {
    RemoteConfig {
        clone_url_template: format!("{}/{{name}}.git", root.display()),
        push_url_template: format!("{}/{{name}}-push.git", root.display()),
        push_remote: push_remote.to_string(),
        branch: "master".to_string(),
    }
}

#[tokio::test]
async fn open_adds_separate_push_remote() {
    let temp = temp_dir();
    let root = temp.path();
    bare_remote(root, "foo", &[("PKGBUILD", "pkgname=foo\n")]);
    let git_cli = ShellBackend::default();

    let repo = RemoteRepository::open(&git_cli, &remote_config(root, "aur"), "foo")
        .await
        .expect("open");
    assert!(repo.path().ends_with("foo"));
    assert!(repo.pkgbuild().is_file());
    assert_eq!(repo.clone_url(), format!("{}/foo.git", root.display()));
    assert_eq!(
        git(repo.path(), &["remote", "get-url", "aur"]),
        format!("{}/foo-push.git", root.display())
    );
    assert_eq!(
        git(repo.path(), &["remote", "get-url", "origin"]),
        format!("{}/foo.git", root.display())
    );
    assert_eq!(
        query::tracked_files(repo.path()).expect("tracked").into_iter().collect::<Vec<_>>(),
        ["PKGBUILD"]
    );
}

#[tokio::test]
async fn open_with_origin_repoints_origin() {
    let temp = temp_dir();
    let root = temp.path();
    bare_remote(root, "foo", &[]);

    let repo = RemoteRepository::open(&ShellBackend::default(), &remote_config(root, "origin"), "foo")
        .await
        .expect("open");
    assert_eq!(
        git(repo.path(), &["remote", "get-url", "origin"]),
        format!("{}/foo-push.git", root.display())
    );
}

#[tokio::test]
async fn open_missing_remote_is_clone_error() {
    let temp = temp_dir();
    let err = RemoteRepository::open(&ShellBackend::default(), &remote_config(temp.path(), "aur"), "absent")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::CloneFailed { .. })
    ));
}

#[tokio::test]
async fn diverged_push_needs_force() {
    let temp = temp_dir();
    let root = temp.path();
    let bare = bare_remote(root, "foo", &[("PKGBUILD", "pkgname=foo\n")]);
    let git_cli = ShellBackend::default();
    // push straight to the clone remote
    let mut config = remote_config(root, "origin");
    config.push_url_template = config.clone_url_template.clone();

    let ours = RemoteRepository::open(&git_cli, &config, "foo").await.expect("ours");
    let theirs = RemoteRepository::open(&git_cli, &config, "foo").await.expect("theirs");
    for repo in [&ours, &theirs] {
        git_cli.set_config(repo.path(), "user.name", "Test").await.expect("name");
        git_cli.set_config(repo.path(), "user.email", "test@example.com").await.expect("email");
    }

    write_file(theirs.path(), "theirs.txt", "theirs\n");
    git_cli.add_all(theirs.path()).await.expect("add");
    git_cli.commit(theirs.path(), "theirs", false).await.expect("commit");
    git_cli.push(theirs.path(), "origin", "master", false).await.expect("push");

    write_file(ours.path(), "ours.txt", "ours\n");
    git_cli.add_all(ours.path()).await.expect("add");
    assert!(git_cli.has_staged_changes(ours.path()).await.expect("diff"));
    git_cli.commit(ours.path(), "ours", false).await.expect("commit");

    let err = git_cli
        .push(ours.path(), "origin", "master", false)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::PushFailed { .. })
    ));

    git_cli
        .push(ours.path(), "origin", "master", true)
        .await
        .expect("force push");
    assert_eq!(commit_count(&bare), 2);
    assert_eq!(git(&bare, &["log", "-1", "--format=%s", "master"]), "ours");
}
