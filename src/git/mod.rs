// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!         Public API
//!     query.rs      ShellBackend
//!         |              |
//!         v              v
//!     GitQuery       git CLI (async)
//!   (gix, read)     .clone_repo  .ls_files[_included]
//!         |         .rm  .add_all  .add_force
//!         v         .has_staged_changes  .commit
//!     GixBackend    .push  .add_remote  .set_config
//!     .is_git_repo
//!     .tracked_files
//! ```
//!
//! **`GixBackend`** reads repository state without a subprocess.
//! **`ShellBackend`** runs git for everything that writes or talks to a remote.

pub mod backend;
pub mod query;

pub use backend::ShellBackend;
