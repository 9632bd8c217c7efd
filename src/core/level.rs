//! Severity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, ordered from least to most severe.
///
/// `Log` is a distinct level ranked directly above `Info`, so a floor of
/// `Info` admits `log` calls while renderers can still tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Verbose = 2,
    #[default]
    Info = 3,
    Log = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
}

impl Level {
    /// Every level, least severe first
    pub const ALL: [Level; 8] = [
        Level::Trace,
        Level::Debug,
        Level::Verbose,
        Level::Info,
        Level::Log,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
            Level::Info => "INFO",
            Level::Log => "LOG",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// The level an external logger should use when looking this one up by
    /// name. `Log` has no counterpart elsewhere and maps to `Info`.
    pub fn canonical(self) -> Level {
        match self {
            Level::Log => Level::Info,
            other => other,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Trace => BrightBlack,
            Level::Debug => Blue,
            Level::Verbose => Cyan,
            Level::Info | Level::Log => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "VERBOSE" => Ok(Level::Verbose),
            "INFO" => Ok(Level::Info),
            "LOG" => Ok(Level::Log),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
