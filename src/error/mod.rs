// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            PublishError (~24 bytes)
//!                     |
//!   +------+------+---+----+-------+----+--------+
//!   |      |      |        |       |    |        |
//!   v      v      v        v       v    v        v
//! Bail    Cfg   Resolve   Git   Proc   Fs   Io/Other
//!         Box    Box      Box    Box   Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config     MissingInput, Conflict, InvalidValue, ParseError
//!   Resolution DescriptorMissing, NameUndeterminable, UnresolvableDependency
//!   Git        Gix, CommandFailed, CloneFailed, PushFailed
//!   Process    ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs         NotFound, PathEscapesRoot, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PublishError`].
pub type PublishResult<T> = std::result::Result<T, PublishError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Fatal error that should terminate the pipeline.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Descriptor or dependency resolution error.
    #[error("resolution error: {0}")]
    Resolution(#[from] Box<ResolutionError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`PublishError::Bailed`] that terminates the pipeline.
pub fn bail_out(message: impl Into<String>) -> PublishError {
    PublishError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PublishError {
                fn from(err: $error) -> Self {
                    PublishError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ResolutionError => Resolution,
    GitError => Git,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to access repository index.
    #[error("failed to access index: {0}")]
    Index(#[from] gix::worktree::open_index::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Push operation failed.
    #[error("failed to push to {remote}/{branch}: {message}")]
    PushFailed {
        remote: String,
        branch: String,
        message: String,
    },
}

// --- Config Errors ---

/// Configuration and input validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// A required input was not provided.
    #[error("missing required input '{key}'")]
    MissingInput { key: String },

    /// Two mutually exclusive inputs were both provided.
    #[error("inputs '{first}' and '{second}' are mutually exclusive")]
    Conflict { first: String, second: String },

    /// Input has an unacceptable value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Resolution Errors ---

/// Descriptor and dependency resolution errors.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The package descriptor does not exist.
    #[error("package descriptor not found: {path}")]
    DescriptorMissing { path: String },

    /// No package name could be derived.
    #[error("cannot determine package name from {path}")]
    NameUndeterminable { path: String },

    /// Metadata export could not be parsed.
    #[error("malformed metadata at line {line}: {message}")]
    MalformedMetadata { line: usize, message: String },

    /// A dependency could not be installed by any means.
    #[error("dependency '{name}' could not be resolved: {message}")]
    UnresolvableDependency { name: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// A relative path would resolve outside of its root.
    #[error("path escapes sync root: {0}")]
    PathEscapesRoot(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
