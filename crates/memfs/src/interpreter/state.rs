//! Execution result

use serde::Serialize;

/// Outcome of executing one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecResult {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit code
    pub exit_code: i32,
    /// Set by `exit`; the session should stop reading commands.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exit_requested: bool,
}

impl ExecResult {
    /// Create a successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// Create a failed result with the given stderr.
    pub fn err(stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stderr: stderr.into(),
            exit_code,
            ..Self::default()
        }
    }

    /// Result of the `exit` command.
    pub fn exit() -> Self {
        Self {
            exit_requested: true,
            ..Self::default()
        }
    }

    /// Check if the result indicates success.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<crate::Error> for ExecResult {
    fn from(err: crate::Error) -> Self {
        Self::err(format!("{err}\n"), err.exit_code())
    }
}
