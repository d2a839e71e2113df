//! Memfs CLI - Command line interface for the in-memory virtual filesystem
//!
//! Usage:
//!   memfs                          # Interactive prompt
//!   memfs -c 'mkdir docs' -c 'ls'  # Execute command lines in order
//!   memfs commands.txt             # Execute each line of a command file
//!
//! Every session starts from an empty filesystem and is discarded on exit.
//! Set `RUST_LOG=memfs=debug` to trace executed commands on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use memfs::{ExecResult, LogConfig, Shell};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Memfs - In-memory virtual filesystem shell
#[derive(Parser, Debug)]
#[command(name = "memfs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Execute the given command line (repeatable)
    #[arg(short = 'c')]
    command: Vec<String>,

    /// Command file to execute, one command per line
    #[arg()]
    script: Option<PathBuf>,

    /// Print each result as a JSON object on its own line
    #[arg(long)]
    json: bool,

    /// Prompt shown in interactive mode
    #[arg(long, default_value = "Enter command: ")]
    prompt: String,

    /// Include file contents in debug logs
    #[arg(long)]
    log_file_contents: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("memfs: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut log = LogConfig::new();
    if args.log_file_contents {
        log = log.unsafe_log_file_contents();
    }
    let mut shell = Shell::builder().log_config(log).build();
    let output = Output { json: args.json };

    if !args.command.is_empty() {
        return run_lines(&mut shell, &output, args.command.iter().map(String::as_str));
    }

    if let Some(script_path) = args.script {
        let script = std::fs::read_to_string(&script_path)
            .with_context(|| format!("Failed to read command file: {}", script_path.display()))?;
        return run_lines(&mut shell, &output, script.lines());
    }

    tracing::debug!("starting interactive session");
    interactive(&mut shell, &output, &args.prompt)
}

/// Execute lines until they run out or one of them is `exit`.
fn run_lines<'a>(
    shell: &mut Shell,
    output: &Output,
    lines: impl Iterator<Item = &'a str>,
) -> Result<()> {
    for line in lines {
        let result = shell.exec(line);
        output.emit(&result)?;
        if result.exit_requested {
            break;
        }
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn interactive(shell: &mut Shell, output: &Output, prompt: &str) -> Result<()> {
    use rustyline::DefaultEditor;
    use rustyline::error::ReadlineError;

    let mut rl = DefaultEditor::new().context("Failed to create editor")?;

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }

                let result = shell.exec(&line);
                output.emit(&result)?;
                if result.exit_requested {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read command"),
        }
    }

    Ok(())
}

#[cfg(not(feature = "interactive"))]
fn interactive(shell: &mut Shell, output: &Output, prompt: &str) -> Result<()> {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{prompt}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;

        let result = shell.exec(&line);
        output.emit(&result)?;
        if result.exit_requested {
            break;
        }
    }

    Ok(())
}

struct Output {
    json: bool,
}

impl Output {
    fn emit(&self, result: &ExecResult) -> Result<()> {
        if self.json {
            if result.exit_requested {
                return Ok(());
            }
            println!("{}", serde_json::to_string(result)?);
            return Ok(());
        }

        print!("{}", result.stdout);
        if !result.stderr.is_empty() {
            eprint!("{}", result.stderr);
        }
        std::io::stdout().flush()?;
        Ok(())
    }
}
