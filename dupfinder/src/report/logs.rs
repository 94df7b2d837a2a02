//! Console status lines.
//!
//! Every line goes through a [`Console`], which owns the writer. The binary
//! writes to stdout; tests hand in a `Vec<u8>` and read it back.

use std::io::{self, Write};

/// Log level, rendered as a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️  Warning:",
            LogLevel::Error => "   ❌ Error:",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth under the previous line.
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
        }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Rendered line, without trailing newline.
    pub fn render(&self) -> String {
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, self.level.prefix(), self.message)
    }
}

/// Line-oriented console sink.
///
/// Write failures are swallowed: losing a status line never aborts a run.
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn log(&mut self, entry: LogEntry) {
        let _ = writeln!(self.out, "{}", entry.render());
    }

    /// Write text as-is, no prefix.
    pub fn raw(&mut self, text: impl std::fmt::Display) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, msg));
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Success, msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warning, msg));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, msg));
    }

    pub fn info_indent(&mut self, msg: impl Into<String>, indent: u8) {
        self.log(LogEntry::new(LogLevel::Info, msg).with_indent(indent));
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
