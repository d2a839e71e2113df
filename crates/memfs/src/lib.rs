//! Memfs - In-memory virtual filesystem with a shell-like command interface
//!
//! Nothing touches real storage: the filesystem lives for as long as the
//! [`Shell`] that owns it.
//!
//! # Example
//!
//! ```rust
//! use memfs::Shell;
//!
//! let mut shell = Shell::new();
//! shell.exec("mkdir docs");
//! shell.exec("touch docs/notes.txt");
//! shell.exec("echo docs/notes.txt hello world");
//!
//! let result = shell.exec("cat docs/notes.txt");
//! assert_eq!(result.stdout, "hello world\n");
//! assert_eq!(result.exit_code, 0);
//! ```
//!
//! Programmatic callers can skip the text layer and use [`VirtualFs`]
//! directly:
//!
//! ```rust
//! use memfs::VirtualFs;
//!
//! let mut fs = VirtualFs::new();
//! fs.touch("f")?;
//! fs.echo("f", "a b c")?;
//! assert_eq!(fs.grep("b", "f")?, vec!["b"]);
//! # Ok::<(), memfs::Error>(())
//! ```

mod command;
mod error;
pub mod fs;
mod interpreter;
mod logging;
pub mod path;

pub use command::Command;
pub use error::{Error, Result, Target};
pub use fs::{Listing, Node, NodeKind, VirtualFs};
pub use interpreter::ExecResult;
pub use logging::{LogConfig, sanitize_for_log};

use std::sync::Arc;
use tokio::sync::Mutex;

use interpreter::Interpreter;

/// Main entry point for memfs.
///
/// One filesystem instance plus the command interpreter driving it.
pub struct Shell {
    interpreter: Interpreter,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Create a new shell over an empty filesystem, cursor at `/`.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(VirtualFs::new()),
        }
    }

    /// Create a new ShellBuilder for customized configuration.
    pub fn builder() -> ShellBuilder {
        ShellBuilder::default()
    }

    /// Execute one command line and return the result.
    ///
    /// Errors never escape: they are reported on stderr with a non-zero
    /// exit code, and the filesystem is left as it was.
    pub fn exec(&mut self, line: &str) -> ExecResult {
        self.interpreter.exec_line(line)
    }

    /// Execute an already parsed command.
    pub fn execute(&mut self, command: &Command) -> ExecResult {
        self.interpreter.execute(command)
    }

    /// The underlying filesystem.
    pub fn fs(&self) -> &VirtualFs {
        self.interpreter.fs()
    }

    /// Mutable access to the underlying filesystem.
    pub fn fs_mut(&mut self) -> &mut VirtualFs {
        self.interpreter.fs_mut()
    }
}

/// Builder for customized Shell configuration.
#[derive(Default)]
pub struct ShellBuilder {
    seeds: Vec<(String, Node)>,
    cwd: Option<String>,
    log: LogConfig,
}

impl ShellBuilder {
    /// Pre-create a directory. Relative paths are taken from `/`.
    pub fn dir(mut self, path: impl Into<String>) -> Self {
        self.seeds.push((path.into(), Node::Directory));
        self
    }

    /// Pre-create a file with the given content.
    pub fn file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.seeds.push((
            path.into(),
            Node::File {
                content: content.into(),
            },
        ));
        self
    }

    /// Set the initial working directory, created if absent.
    pub fn cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the logging configuration.
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Build the Shell instance.
    pub fn build(self) -> Shell {
        let mut fs = VirtualFs::new().with_log_config(self.log);

        for (path, node) in self.seeds {
            fs.seed(&path, node);
        }

        if let Some(cwd) = self.cwd {
            fs.seed_cwd(&cwd);
        }

        Shell {
            interpreter: Interpreter::new(fs),
        }
    }
}

/// Cloneable handle for callers that share one shell across tasks.
///
/// Every command holds the lock for its whole run, so at most one mutation
/// is in flight per filesystem.
#[derive(Clone)]
pub struct SharedShell {
    inner: Arc<Mutex<Shell>>,
}

impl SharedShell {
    pub fn new(shell: Shell) -> Self {
        Self {
            inner: Arc::new(Mutex::new(shell)),
        }
    }

    /// Execute one command line under the lock.
    pub async fn exec(&self, line: &str) -> ExecResult {
        self.inner.lock().await.exec(line)
    }

    /// Run a closure with exclusive access to the shell.
    ///
    /// Use this to group several operations into one atomic step.
    pub async fn with<R>(&self, f: impl FnOnce(&mut Shell) -> R) -> R {
        let mut shell = self.inner.lock().await;
        f(&mut shell)
    }
}

impl From<Shell> for SharedShell {
    fn from(shell: Shell) -> Self {
        Self::new(shell)
    }
}
