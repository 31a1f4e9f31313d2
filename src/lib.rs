// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          publish / inspect
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, AURPUB_*, INPUT_*  |
//!              '-------------+-------------'
//!                            v
//!                        pipeline
//!    sync -> version -> checksums -> validate/deps -> metadata -> publish
//!                 |           |            |
//!                 v           v            v
//!            descriptor     tools         git
//!             .SRCINFO   makepkg/pacman  gix/CLI
//!
//!   +-----------------------------------------+
//!   |  core   process                         |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod descriptor;
pub mod error;
pub mod git;
pub mod logging;
pub mod pipeline;
pub mod tools;
pub mod utility;
