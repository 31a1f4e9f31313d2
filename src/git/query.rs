// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::PublishResult;

use super::backend::{GitQuery, GixBackend};

/// Whether `path` lies inside a non-bare git work tree.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Paths in the index of the repository containing `path`.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or index access fails.
pub fn tracked_files(path: &Path) -> PublishResult<BTreeSet<String>> {
    GixBackend::tracked_files(path)
}
