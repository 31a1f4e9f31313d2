// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  parallel_walk()   ignore::WalkParallel (multi-core)
//!        relative_files()  /-separated paths under a root
//!        find_files()      wax glob matching
//!        WalkOptions       max_depth, hidden, gitignore, skip_dirs
//! copy:  copy_file_async()            tokio::fs, creates parents
//!        copy_relative_files_async()  same relative layout
//!        remove_file_pruning()        delete + prune empty dirs
//! ```

pub mod copy;
pub mod walk;

#[cfg(test)]
mod tests;
