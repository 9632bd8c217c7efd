//! Configuration for the bundled default logger
//!
//! A `Config` describes the logger most applications start from: the
//! bracketed renderer, a console sink, optional timestamp and level
//! contexts, and an optional severity floor. It can be read from the
//! environment or from JSON.

use crate::core::{Level, Logger, LoggerError, Result, Sink, TimestampFormat};
use crate::renderers;
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_LEVEL: &str = "LOGWEAVE_LEVEL";
pub const ENV_COLOR: &str = "LOGWEAVE_COLOR";
pub const ENV_TIMESTAMP: &str = "LOGWEAVE_TIMESTAMP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calls below this level are not committed
    pub min_level: Option<Level>,
    /// Colour console lines by level
    pub use_colors: bool,
    /// Push a timestamp context in this format
    pub timestamp: Option<TimestampFormat>,
    /// Push a context carrying the level name
    pub include_level: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_level: None,
            use_colors: true,
            timestamp: Some(TimestampFormat::default()),
            include_level: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from `LOGWEAVE_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults. `LOGWEAVE_TIMESTAMP=off`
    /// disables the timestamp context.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(level) = read_env(ENV_LEVEL) {
            config.min_level = Some(
                level
                    .parse()
                    .map_err(|msg: String| LoggerError::config(ENV_LEVEL, msg))?,
            );
        }

        if let Some(color) = read_env(ENV_COLOR) {
            config.use_colors = parse_switch(&color)
                .ok_or_else(|| LoggerError::config(ENV_COLOR, format!("expected on/off, got '{}'", color)))?;
        }

        if let Some(stamp) = read_env(ENV_TIMESTAMP) {
            config.timestamp = match parse_switch(&stamp) {
                Some(false) => None,
                Some(true) => Some(TimestampFormat::default()),
                None => Some(
                    stamp
                        .parse()
                        .map_err(|msg: String| LoggerError::config(ENV_TIMESTAMP, msg))?,
                ),
            };
        }

        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, format: Option<TimestampFormat>) -> Self {
        self.timestamp = format;
        self
    }

    #[must_use]
    pub fn with_level(mut self, include_level: bool) -> Self {
        self.include_level = include_level;
        self
    }

    /// Build the default logger committing to the console
    pub fn build(&self) -> Logger<String> {
        self.build_with(default_sink(self.use_colors))
    }

    /// Build the default logger, committing to `sink` instead of the console
    pub fn build_with(&self, sink: Sink<String>) -> Logger<String> {
        let mut logger = Logger::new(sink, renderers::bracketed());
        if let Some(format) = &self.timestamp {
            logger = logger.fork(renderers::timestamp_with(format.clone()));
        }
        if self.include_level {
            logger = logger.fork(renderers::level());
        }
        logger.r#if(self.min_level)
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(feature = "console")]
fn default_sink(use_colors: bool) -> Sink<String> {
    crate::sinks::ConsoleSink::with_colors(use_colors).sink()
}

#[cfg(not(feature = "console"))]
fn default_sink(_use_colors: bool) -> Sink<String> {
    crate::sinks::nowhere()
}
