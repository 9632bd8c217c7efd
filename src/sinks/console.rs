//! Console sink implementation

use crate::core::{Commit, CommitResult, Level, Sink};
use colored::Colorize;
use std::fmt::Display;
use std::io::Write;

/// Writes each rendered call as one line; `Error` and `Fatal` go to stderr,
/// everything else to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Wrap into a `Sink` for any displayable rendered type
    pub fn sink<R>(self) -> Sink<R>
    where
        R: Display + Send + Sync + 'static,
    {
        Sink::from_commit(self)
    }

    fn format_line(&self, level: Level, rendered: &dyn Display) -> String {
        let line = rendered.to_string();
        if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Display> Commit<R> for ConsoleSink {
    fn commit(&self, level: Level, rendered: &R) -> CommitResult {
        let line = self.format_line(level, rendered);

        match level {
            Level::Error | Level::Fatal => writeln!(std::io::stderr().lock(), "{}", line)?,
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }
}
