// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_file_async, copy_relative_files_async, remove_file_pruning};
use super::walk::{WalkOptions, find_files, parallel_walk, relative_files, to_slash};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, rel).expect("write");
}

#[test]
fn test_parallel_walk() {
    let temp = temp_dir();
    touch(temp.path(), "file1.txt");
    touch(temp.path(), "subdir/file2.txt");

    let result = parallel_walk(temp.path(), &WalkOptions::default()).expect("walk");
    assert_eq!(result.files().len(), 2);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_parallel_walk_many_files() {
    let temp = temp_dir();
    for i in 0..1500 {
        touch(temp.path(), &format!("f{i}.txt"));
    }

    let result = parallel_walk(temp.path(), &WalkOptions::default()).expect("walk");
    assert_eq!(result.files().len(), 1500);
}

#[test]
fn test_parallel_walk_missing_root() {
    assert!(parallel_walk("/nonexistent/aurpub-root", &WalkOptions::default()).is_err());
}

#[test]
fn test_relative_files_everything_skips_git() {
    let temp = temp_dir();
    touch(temp.path(), "PKGBUILD");
    touch(temp.path(), ".SRCINFO");
    touch(temp.path(), "patches/a.patch");
    touch(temp.path(), ".git/HEAD");
    std::fs::write(temp.path().join(".gitignore"), "*.patch\n").expect("write");

    let files = relative_files(temp.path(), &WalkOptions::everything()).expect("walk");
    insta::assert_debug_snapshot!(files, @r#"
    {
        ".SRCINFO",
        ".gitignore",
        "PKGBUILD",
        "patches/a.patch",
    }
    "#);
}

#[test]
fn test_to_slash() {
    assert_eq!(to_slash(Path::new("a/b/c.patch")), "a/b/c.patch");
}

#[test]
fn test_find_files_glob() {
    let temp = temp_dir();
    touch(temp.path(), "a.patch");
    touch(temp.path(), "b.patch");
    touch(temp.path(), "nested/c.patch");
    touch(temp.path(), "foo.install");

    let top = find_files(temp.path(), "*.patch", &WalkOptions::everything()).expect("glob");
    let names: Vec<_> = top
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, ["a.patch", "b.patch"]);

    let deep = find_files(temp.path(), "**/*.patch", &WalkOptions::everything()).expect("glob");
    assert_eq!(deep.len(), 3);
}

#[test]
fn test_find_files_invalid_glob() {
    let temp = temp_dir();
    assert!(find_files(temp.path(), "[", &WalkOptions::default()).is_err());
}

#[tokio::test]
async fn test_copy_file_creates_parents() {
    let temp = temp_dir();
    touch(temp.path(), "src/a.patch");
    let dst = temp.path().join("dst/deep/a.patch");

    copy_file_async(&temp.path().join("src/a.patch"), &dst)
        .await
        .expect("copy");
    assert_eq!(std::fs::read_to_string(dst).expect("read"), "src/a.patch");
}

#[tokio::test]
async fn test_copy_relative_files() {
    let src = temp_dir();
    let dst = temp_dir();
    touch(src.path(), "PKGBUILD");
    touch(src.path(), "patches/a.patch");
    std::fs::write(dst.path().join("PKGBUILD"), "old").expect("write");

    let copied = copy_relative_files_async(src.path(), dst.path(), ["PKGBUILD", "patches/a.patch"])
        .await
        .expect("copy");
    assert_eq!(copied, 2);
    assert_eq!(
        std::fs::read_to_string(dst.path().join("PKGBUILD")).expect("read"),
        "PKGBUILD"
    );
    assert!(dst.path().join("patches/a.patch").is_file());
}

#[tokio::test]
async fn test_remove_file_pruning() {
    let temp = temp_dir();
    touch(temp.path(), "a/b/c.patch");
    touch(temp.path(), "a/keep.txt");

    remove_file_pruning(temp.path(), "a/b/c.patch")
        .await
        .expect("remove");
    assert!(!temp.path().join("a/b").exists());
    assert!(temp.path().join("a/keep.txt").is_file());

    remove_file_pruning(temp.path(), "a/b/c.patch")
        .await
        .expect("already gone is fine");
}
