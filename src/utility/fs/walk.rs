// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Every file, hidden or ignored, except inside `.git`.
    #[must_use]
    pub fn everything() -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_respect_gitignore(false)
            .with_skip_dirs(vec![".git".to_string()])
            .build()
    }
}

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    pub(crate) const fn new(files: Vec<PathBuf>, error_count: usize) -> Self {
        Self { files, error_count }
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    // Evaluated before descending
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Performs parallel directory traversal using `ignore::WalkParallel`.
///
/// Only regular files are collected. Walk errors are logged and counted.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use aurpub::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let result = parallel_walk("aur/foo", &WalkOptions::everything())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let (file_tx, file_rx) = bounded::<PathBuf>(1000);
    let error_count = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(root, options).build_parallel();

    // The receiver is drained on this thread while the walkers run.
    let files = std::thread::scope(|scope| {
        let collector = scope.spawn(move || file_rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let file_tx = file_tx.clone();
            let error_count = Arc::clone(&error_count);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        if entry.file_type().is_some_and(|ft| ft.is_file()) {
                            let _ = file_tx.send(entry.path().to_path_buf());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(file_tx);
        collector.join().unwrap_or_default()
    });

    Ok(WalkResult::new(files, error_count.load(Ordering::Relaxed)))
}

/// Files under `root` as `/`-separated paths relative to `root`.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
pub fn relative_files<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<BTreeSet<String>> {
    let root = root.as_ref();
    let result = parallel_walk(root, options)?;
    Ok(result
        .files()
        .iter()
        .filter_map(|path| path.strip_prefix(root).ok())
        .map(to_slash)
        .collect())
}

/// Joins the components of a relative path with `/`.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Finds files whose path relative to `root` matches a `wax` glob.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use aurpub::utility::fs::walk::{find_files, WalkOptions};
///
/// let patches = find_files(".", "*.patch", &WalkOptions::everything())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let mut matches: Vec<PathBuf> = parallel_walk(root, options)?
        .files()
        .iter()
        .filter(|path| {
            path.strip_prefix(root)
                .is_ok_and(|rel| glob.is_match(rel))
        })
        .cloned()
        .collect();
    matches.sort();
    Ok(matches)
}
