//! Adapter committing to the `log` crate facade

use crate::core::{Commit, CommitResult, Level, Sink};
use std::fmt::Display;

/// Forwards rendered calls to whatever `log` implementation is installed.
///
/// Levels are looked up by their canonical name, so `Log` is emitted as
/// `info` and `Verbose` as `debug`.
#[derive(Debug, Clone)]
pub struct LogFacadeSink {
    target: String,
}

impl LogFacadeSink {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn sink<R>(self) -> Sink<R>
    where
        R: Display + Send + Sync + 'static,
    {
        Sink::from_commit(self)
    }

    pub fn facade_level(level: Level) -> log::Level {
        match level.canonical() {
            Level::Fatal | Level::Error => log::Level::Error,
            Level::Warn => log::Level::Warn,
            Level::Info | Level::Log => log::Level::Info,
            Level::Verbose | Level::Debug => log::Level::Debug,
            Level::Trace => log::Level::Trace,
        }
    }
}

impl<R: Display> Commit<R> for LogFacadeSink {
    fn commit(&self, level: Level, rendered: &R) -> CommitResult {
        log::log!(target: self.target.as_str(), Self::facade_level(level), "{}", rendered);
        Ok(())
    }
}
