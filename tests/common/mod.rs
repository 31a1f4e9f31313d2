// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Stand-in for makepkg. `--printsrcinfo` sources the PKGBUILD and prints a
/// minimal `.SRCINFO`. Every other invocation is appended to `makepkg.log`
/// next to the script and leaves build output the way makepkg does: an
/// extracted `src/` under `$BUILDDIR/<pkgbase>` (or the package directory),
/// a source tarball in `$SRCDEST` and, unless `--nobuild`, a package in
/// `$PKGDEST`.
pub const FAKE_MAKEPKG: &str = r#"#!/bin/bash
set -e
file=PKGBUILD
mode=other
args="$*"
while [ $# -gt 0 ]; do
  case "$1" in
    -p) file="$2"; shift 2 ;;
    --printsrcinfo) mode=srcinfo; shift ;;
    *) shift ;;
  esac
done
if [ "$mode" != srcinfo ]; then
  echo "$args" >> "$(dirname "$0")/makepkg.log"
  source "./$file"
  base="${pkgbase:-$pkgname}"
  builddir="${BUILDDIR:+$BUILDDIR/$base}"
  builddir="${builddir:-$PWD}"
  mkdir -p "$builddir/src" "$builddir/pkg"
  echo 'int main(void) { return 0; }' > "$builddir/src/main.c"
  touch "${SRCDEST:-$PWD}/$base-$pkgver.tar.gz"
  case " $args " in
    *" --nobuild "*) ;;
    *) touch "${PKGDEST:-$PWD}/$base-$pkgver-$pkgrel-x86_64.pkg.tar.zst" ;;
  esac
  exit 0
fi
source "./$file"
printf 'pkgbase = %s\n' "$pkgname"
printf '\tpkgver = %s\n' "$pkgver"
printf '\tpkgrel = %s\n' "$pkgrel"
for d in "${depends[@]}"; do printf '\tdepends = %s\n' "$d"; done
for s in "${source[@]}"; do printf '\tsource = %s\n' "$s"; done
printf '\npkgname = %s\n' "$pkgname"
"#;

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write");
}

/// Writes an executable file with the given full contents.
pub fn write_executable(dir: &Path, name: &str, contents: &str) -> PathBuf {
    std::fs::create_dir_all(dir).expect("mkdir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod");
    path
}

pub fn fake_makepkg(dir: &Path) -> PathBuf {
    write_executable(dir, "makepkg", FAKE_MAKEPKG)
}

/// Runs git and returns trimmed stdout. Panics on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn init_repo(dir: &Path) {
    std::fs::create_dir_all(dir).expect("mkdir");
    git(dir, &["init", "--quiet", "--initial-branch=master"]);
    git(dir, &["config", "user.name", "Fixture"]);
    git(dir, &["config", "user.email", "fixture@example.com"]);
}

/// Creates `<root>/<name>.git` with one commit holding `files`.
pub fn bare_remote(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let bare = root.join(format!("{name}.git"));
    std::fs::create_dir_all(&bare).expect("mkdir");
    git(&bare, &["init", "--quiet", "--bare", "--initial-branch=master"]);

    let seed = root.join(format!("{name}-seed"));
    init_repo(&seed);
    for (rel, content) in files {
        write_file(&seed, rel, content);
    }
    git(&seed, &["add", "--all"]);
    git(&seed, &["commit", "--quiet", "--allow-empty", "-m", "seed"]);
    git(&seed, &["push", "--quiet", &bare.to_string_lossy(), "HEAD:refs/heads/master"]);
    std::fs::remove_dir_all(&seed).expect("remove seed");
    bare
}

/// Files on the remote's master branch.
pub fn remote_files(bare: &Path) -> Vec<String> {
    git(bare, &["ls-tree", "-r", "--name-only", "master"])
        .lines()
        .map(ToString::to_string)
        .collect()
}

pub fn commit_count(bare: &Path) -> usize {
    git(bare, &["rev-list", "--count", "master"])
        .parse()
        .expect("count")
}
