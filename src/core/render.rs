//! Renderer wrapper

use super::{
    error::{BoxError, LoggerError, Result},
    level::Level,
    value::Value,
};
use std::fmt;
use std::sync::Arc;

type RenderFn<R> = Arc<dyn Fn(Level, &[Value], &[Value]) -> std::result::Result<R, BoxError> + Send + Sync>;

/// Folds `(level, contexts, messages)` into the value sinks consume.
///
/// A logger calls its renderer exactly once per committed log call, so a
/// renderer may capture non-idempotent state such as the current time.
pub struct Renderer<R> {
    render: RenderFn<R>,
}

impl<R> Renderer<R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Level, &[Value], &[Value]) -> R + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(move |level: Level, contexts: &[Value], messages: &[Value]| {
                Ok::<R, BoxError>(f(level, contexts, messages))
            }),
        }
    }

    /// A renderer that may fail; the failure rejects the log call's handle
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(Level, &[Value], &[Value]) -> std::result::Result<R, BoxError> + Send + Sync + 'static,
    {
        Self { render: Arc::new(f) }
    }

    pub fn render(&self, level: Level, contexts: &[Value], messages: &[Value]) -> Result<R> {
        (self.render)(level, contexts, messages)
            .map_err(|err| LoggerError::from_boxed(err, LoggerError::RenderFailed))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.render, &other.render)
    }
}

impl<R> Clone for Renderer<R> {
    fn clone(&self) -> Self {
        Self {
            render: Arc::clone(&self.render),
        }
    }
}

impl<R> fmt::Debug for Renderer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderer(..)")
    }
}
