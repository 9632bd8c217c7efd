//! Context producers evaluated on every log call

use crate::core::{Context, TimestampFormat, Value};
use chrono::Utc;

/// Capture the time of each log call, ISO 8601 formatted
pub fn timestamp() -> Context {
    timestamp_with(TimestampFormat::default())
}

pub fn timestamp_with(format: TimestampFormat) -> Context {
    Context::producer(move |_| Value::from(format.format(&Utc::now())))
}

/// The name of each call's level, e.g. `LOG` for `Logger::log`
pub fn level() -> Context {
    Context::producer(|level| level.to_str())
}
