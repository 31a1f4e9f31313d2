// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  parallel_walk(), relative_files(), find_files(), WalkOptions
//!   copy:  copy_file_async(), copy_relative_files_async(), remove_file_pruning()
//! ```

pub mod fs;
