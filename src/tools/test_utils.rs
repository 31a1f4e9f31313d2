// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fixtures for tool and pipeline tests.
//!
//! Fake tools are small `/bin/sh` scripts. Remotes are local bare repositories.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub(crate) fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Writes an executable shell script and returns its path.
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod");
    path
}

pub(crate) fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write");
}

pub(crate) fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn init_repo(dir: &Path) {
    git(dir, &["init", "--quiet", "--initial-branch=master"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test"]);
}

/// Creates `<root>/<name>.git` as a bare repository. When `files` is not
/// empty it gets one commit on `master` holding them.
pub(crate) fn bare_remote(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let bare = root.join(format!("{name}.git"));
    std::fs::create_dir_all(&bare).expect("mkdir");
    git(&bare, &["init", "--quiet", "--bare", "--initial-branch=master"]);

    if !files.is_empty() {
        let seed = root.join(format!("{name}-seed"));
        std::fs::create_dir_all(&seed).expect("mkdir");
        init_repo(&seed);
        for (rel, content) in files {
            write_file(&seed, rel, content);
        }
        git(&seed, &["add", "--all"]);
        git(&seed, &["commit", "--quiet", "-m", "seed"]);
        let bare_url = bare.to_string_lossy().into_owned();
        git(&seed, &["push", "--quiet", &bare_url, "HEAD:refs/heads/master"]);
        std::fs::remove_dir_all(&seed).expect("cleanup seed");
    }
    bare
}

/// Clone URL template pointing at bare remotes under `root`.
pub(crate) fn local_template(root: &Path) -> String {
    format!("{}/{{name}}.git", root.display())
}

/// Lines of a file, or nothing if it is missing.
pub(crate) fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(ToString::to_string).collect())
        .unwrap_or_default()
}
