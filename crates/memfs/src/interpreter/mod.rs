//! Interpreter for executing parsed commands

mod state;

pub use state::ExecResult;

use crate::command::Command;
use crate::error::Result;
use crate::fs::VirtualFs;

/// Interpreter state: the filesystem a command line operates on.
pub struct Interpreter {
    fs: VirtualFs,
}

impl Interpreter {
    /// Create a new interpreter over the given filesystem.
    pub fn new(fs: VirtualFs) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut VirtualFs {
        &mut self.fs
    }

    /// Parse and execute one input line.
    ///
    /// Never fails: parse and command errors come back on stderr.
    pub fn exec_line(&mut self, line: &str) -> ExecResult {
        tracing::debug!(line = %self.fs.log_config().format_line(line), "exec");
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(&command),
            Ok(None) => ExecResult::default(),
            Err(err) => {
                tracing::debug!(error = %err, "rejected command line");
                err.into()
            }
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: &Command) -> ExecResult {
        match self.dispatch(command) {
            Ok(result) => result,
            Err(err) => {
                tracing::debug!(verb = command.verb(), error = %err, "command failed");
                err.into()
            }
        }
    }

    fn dispatch(&mut self, command: &Command) -> Result<ExecResult> {
        let fs = &mut self.fs;
        let stdout = match command {
            Command::Mkdir { name } => {
                fs.mkdir(name)?;
                String::new()
            }
            Command::Cd { path } => {
                fs.cd(path)?;
                String::new()
            }
            Command::Ls { path } => {
                let listing = fs.ls(path.as_deref())?;
                format!(
                    "Contents of {}: {}\n",
                    listing.target,
                    format_list(&listing.entries)
                )
            }
            Command::Grep { pattern, path } => {
                let matches = fs.grep(pattern, path)?;
                format!("Matches for '{}': {}\n", pattern, format_list(&matches))
            }
            Command::Cat { path } => format!("{}\n", fs.cat(path)?),
            Command::Touch { name } => {
                fs.touch(name)?;
                String::new()
            }
            Command::Echo { path, text } => {
                fs.echo(path, text)?;
                String::new()
            }
            Command::Mv {
                source,
                destination,
            } => {
                fs.mv(source, destination)?;
                String::new()
            }
            Command::Cp {
                source,
                destination,
            } => {
                fs.cp(source, destination)?;
                String::new()
            }
            Command::Rm { path } => {
                fs.rm(path)?;
                String::new()
            }
            Command::Exit => return Ok(ExecResult::exit()),
        };

        Ok(ExecResult::ok(stdout))
    }
}

/// Render items as a bracketed, quoted list: `['a', 'b']`.
fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote_item(item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Quote one list item. Single quotes unless the item holds a `'` and no
/// `"`, in which case double quotes avoid escaping.
fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
