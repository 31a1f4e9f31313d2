// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Grouped log sections and fatal error lines.
//!
//! ```text
//! GITHUB_ACTIONS=true   ::group::Synchronizing files
//!                       ...
//!                       ::endgroup::
//!                       ::error::<message>
//!
//! otherwise             INFO ==> Synchronizing files
//!                       Error: <message>
//! ```

use std::io::Write as _;

use tracing::info;

/// How section markers and fatal lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStyle {
    /// GitHub Actions workflow commands on stdout.
    Actions,
    /// Plain tracing banner lines.
    Plain,
}

impl GroupStyle {
    /// Detects the style from the `GITHUB_ACTIONS` environment variable.
    #[must_use]
    pub fn detect() -> Self {
        match std::env::var("GITHUB_ACTIONS") {
            Ok(value) if value == "true" => Self::Actions,
            _ => Self::Plain,
        }
    }

    /// Line opening a section, if this style writes one directly.
    #[must_use]
    pub fn open_marker(self, title: &str) -> Option<String> {
        match self {
            Self::Actions => Some(format!("::group::{}", escape_data(title))),
            Self::Plain => None,
        }
    }

    /// Line closing a section, if this style writes one directly.
    #[must_use]
    pub const fn close_marker(self) -> Option<&'static str> {
        match self {
            Self::Actions => Some("::endgroup::"),
            Self::Plain => None,
        }
    }

    /// The distinguished fatal error line.
    #[must_use]
    pub fn fatal_line(self, message: &str) -> String {
        match self {
            Self::Actions => format!("::error::{}", escape_data(message)),
            Self::Plain => format!("Error: {message}"),
        }
    }
}

/// A section of log output. Closes the section when dropped.
#[must_use = "the group closes as soon as the guard is dropped"]
pub struct LogGroup {
    style: GroupStyle,
}

impl LogGroup {
    /// Opens a section with the detected style.
    pub fn open(title: &str) -> Self {
        Self::open_with(GroupStyle::detect(), title)
    }

    /// Opens a section with an explicit style.
    pub fn open_with(style: GroupStyle, title: &str) -> Self {
        match style.open_marker(title) {
            Some(marker) => emit_stdout(&marker),
            None => info!("==> {title}"),
        }
        Self { style }
    }
}

impl Drop for LogGroup {
    fn drop(&mut self) {
        if let Some(marker) = self.style.close_marker() {
            emit_stdout(marker);
        }
    }
}

/// Writes the single fatal error line for a failed run.
pub fn report_fatal(error: &anyhow::Error) {
    let style = GroupStyle::detect();
    let line = style.fatal_line(&format!("{error:#}"));
    match style {
        GroupStyle::Actions => emit_stdout(&line),
        GroupStyle::Plain => {
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }
}

fn emit_stdout(line: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{line}");
    let _ = stdout.flush();
}

/// Escapes a workflow command payload.
pub(crate) fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
