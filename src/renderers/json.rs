//! JSON renderer for structured output
//!
//! Renders each call as a single-line JSON object (JSONL), suitable for log
//! aggregation tools.

use crate::core::{Level, LoggerError, Renderer, Value};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRecord<'a> {
    level: Level,
    contexts: &'a [Value],
    messages: &'a [Value],
}

/// `{"level":"INFO","contexts":[...],"messages":[...]}`
pub fn json() -> Renderer<String> {
    Renderer::try_new(|level, contexts, messages| {
        let record = JsonRecord {
            level,
            contexts,
            messages,
        };
        serde_json::to_string(&record).map_err(|err| LoggerError::from(err).into())
    })
}
