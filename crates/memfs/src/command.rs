//! Command line parsing
//!
//! One command per line, split on whitespace. There is no quoting: `echo`
//! rejoins everything after the path with single spaces, quotes included.
//! Tokens beyond what a verb takes are ignored.

use crate::error::{Error, Result};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir { name: String },
    Cd { path: String },
    Ls { path: Option<String> },
    Grep { pattern: String, path: String },
    Cat { path: String },
    Touch { name: String },
    Echo { path: String, text: String },
    Mv { source: String, destination: String },
    Cp { source: String, destination: String },
    Rm { path: String },
    Exit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Example
    ///
    /// ```
    /// use memfs::Command;
    ///
    /// let cmd = Command::parse("echo notes.txt hello   world").unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::Echo {
    ///         path: "notes.txt".into(),
    ///         text: "hello world".into(),
    ///     })
    /// );
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args = &mut tokens;

        let command = match verb {
            "mkdir" => Command::Mkdir {
                name: required(args, "mkdir", "name")?,
            },
            "cd" => Command::Cd {
                path: required(args, "cd", "path")?,
            },
            "ls" => Command::Ls {
                path: args.next().map(str::to_string),
            },
            "grep" => Command::Grep {
                pattern: required(args, "grep", "pattern")?,
                path: required(args, "grep", "path")?,
            },
            "cat" => Command::Cat {
                path: required(args, "cat", "path")?,
            },
            "touch" => Command::Touch {
                name: required(args, "touch", "name")?,
            },
            "echo" => Command::Echo {
                path: required(args, "echo", "path")?,
                text: args.collect::<Vec<_>>().join(" "),
            },
            "mv" => Command::Mv {
                source: required(args, "mv", "src")?,
                destination: required(args, "mv", "dst")?,
            },
            "cp" => Command::Cp {
                source: required(args, "cp", "src")?,
                destination: required(args, "cp", "dst")?,
            },
            "rm" => Command::Rm {
                path: required(args, "rm", "path")?,
            },
            "exit" => {
                if args.next().is_some() {
                    return Err(Error::InvalidCommand(
                        line.split_whitespace().collect::<Vec<_>>().join(" "),
                    ));
                }
                Command::Exit
            }
            other => return Err(Error::InvalidCommand(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Verb as typed at the prompt.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Mkdir { .. } => "mkdir",
            Command::Cd { .. } => "cd",
            Command::Ls { .. } => "ls",
            Command::Grep { .. } => "grep",
            Command::Cat { .. } => "cat",
            Command::Touch { .. } => "touch",
            Command::Echo { .. } => "echo",
            Command::Mv { .. } => "mv",
            Command::Cp { .. } => "cp",
            Command::Rm { .. } => "rm",
            Command::Exit => "exit",
        }
    }
}

fn required<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    operand: &'static str,
) -> Result<String> {
    tokens
        .next()
        .map(str::to_string)
        .ok_or(Error::MissingOperand { command, operand })
}
