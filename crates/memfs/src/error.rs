//! Error types for memfs
//!
//! Every failure in this crate is recoverable: the interpreter turns an
//! [`Error`] into a message on stderr and the session continues. Messages
//! are written for the person at the prompt, not for a log parser.

use std::fmt;
use thiserror::Error;

/// Result type alias using memfs's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of entry a lookup expected to find.
///
/// Carried by [`Error::NotFound`] so the message names what the command was
/// looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `cd`, `ls`
    Directory,
    /// `cat`, `grep`, `echo`
    File,
    /// `mv`, `cp`
    Source,
    /// `rm`
    Path,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Directory => "Directory",
            Target::File => "File",
            Target::Source => "Source path",
            Target::Path => "Path",
        })
    }
}

/// memfs error types.
#[derive(Error, Debug)]
pub enum Error {
    /// `mkdir`/`touch` target is already in the table.
    #[error("{kind} already exists: {path}")]
    AlreadyExists {
        kind: crate::fs::NodeKind,
        path: String,
    },

    /// Target is absent, or present with the wrong kind.
    #[error("{target} not found: {path}")]
    NotFound { target: Target, path: String },

    /// Unrecognized command verb.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Known verb with too few arguments.
    #[error("{command}: missing operand <{operand}>")]
    MissingOperand {
        command: &'static str,
        operand: &'static str,
    },

    /// `grep` pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The root entry can be neither removed nor relocated.
    #[error("{command}: cannot operate on root directory")]
    RootProtected { command: &'static str },
}

impl Error {
    /// Create a not-found error for the given path.
    pub fn not_found(target: Target, path: impl Into<String>) -> Self {
        Self::NotFound {
            target,
            path: path.into(),
        }
    }

    /// Shell-style exit status reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidCommand(_) => 127,
            Error::MissingOperand { .. } | Error::InvalidPattern(_) => 2,
            _ => 1,
        }
    }
}
