//! Logging configuration for memfs
//!
//! Events are emitted through `tracing`; installing a subscriber is left to
//! the embedding application.
//!
//! # Log Levels
//!
//! - **DEBUG**: one event per executed command, one per table mutation
//! - **TRACE**: path resolution
//!
//! File content written with `echo` is user data. It stays out of logs
//! unless [`LogConfig::unsafe_log_file_contents`] is set, and even then it is
//! sanitized and truncated.

use std::borrow::Cow;

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether to include file contents in logs (default: false)
    pub log_file_contents: bool,

    /// Maximum length of logged values before truncation (default: 200)
    pub max_value_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file_contents: false,
            max_value_length: 200,
        }
    }
}

impl LogConfig {
    /// Create a new log configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable logging of file contents (UNSAFE)
    ///
    /// # Warning
    ///
    /// File contents may hold anything the user typed, secrets included.
    pub fn unsafe_log_file_contents(mut self) -> Self {
        self.log_file_contents = true;
        self
    }

    /// Set maximum length for logged values
    pub fn max_value_length(mut self, len: usize) -> Self {
        self.max_value_length = len;
        self
    }

    /// Format file content for a log field.
    ///
    /// Without opt-in only the size is reported.
    pub fn format_content(&self, content: &str) -> String {
        if !self.log_file_contents {
            return format!("[content: {} bytes]", content.len());
        }

        let sanitized = sanitize_for_log(content);
        self.truncate(&sanitized).into_owned()
    }

    /// Format a command line for a log field.
    ///
    /// Command lines are logged verbatim apart from sanitizing, except `echo`
    /// whose trailing text is file content. Tokens are split on any
    /// whitespace, the same way the command parser splits them.
    pub fn format_line(&self, line: &str) -> String {
        let mut tokens = line.split_whitespace();
        if !self.log_file_contents && tokens.next() == Some("echo") {
            let path = tokens.next().unwrap_or_default();
            let text = tokens.collect::<Vec<_>>().join(" ");
            return format!(
                "echo {} {}",
                self.truncate(&sanitize_for_log(path)),
                self.format_content(&text)
            );
        }

        self.truncate(&sanitize_for_log(line)).into_owned()
    }

    /// Truncate value if it exceeds max length
    ///
    /// Handles UTF-8 char boundaries properly to avoid panics on multi-byte chars.
    fn truncate<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if value.len() <= self.max_value_length {
            Cow::Borrowed(value)
        } else {
            let mut end = self.max_value_length;
            while end > 0 && !value.is_char_boundary(end) {
                end -= 1;
            }
            Cow::Owned(format!(
                "{}...[truncated {} bytes]",
                &value[..end],
                value.len() - end
            ))
        }
    }
}

/// Escape characters that could forge extra log lines.
pub fn sanitize_for_log(input: &str) -> String {
    input
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect()
}
