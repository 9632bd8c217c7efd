//! The immutable logger value and its combinators

use super::{
    commit::{self, Completion},
    condition::{Condition, IntoCondition},
    context::{Context, IntoContext},
    error::{LoggerError, Result},
    handle::LogHandle,
    level::Level,
    message::IntoMessages,
    render::Renderer,
    sink::{IntoSinks, Sink},
    value::Value,
};
use std::fmt;
use std::sync::Arc;

/// An immutable logger.
///
/// A logger is an aggregate of sinks, one renderer, a context stack and a
/// condition stack. It is never mutated: every combinator returns a new
/// logger and leaves the receiver as it was. Clones share storage and are
/// cheap.
///
/// # Example
///
/// ```
/// use logweave::{renderers, sinks::MemorySink, Level};
///
/// let memory = MemorySink::new();
/// let root = logweave::with_renderer(renderers::bracketed()).to([memory.sink()]);
///
/// let db = root.fork("db").r#if(Level::Warn);
/// db.info("connected");
/// db.error("connection lost");
///
/// assert_eq!(memory.rendered(), vec!["[db] connection lost".to_string()]);
/// ```
pub struct Logger<R> {
    sinks: Arc<Vec<Sink<R>>>,
    render: Renderer<R>,
    contexts: Arc<Vec<Context>>,
    conditions: Arc<Vec<Condition>>,
}

impl<R: Send + Sync + 'static> Logger<R> {
    /// Create a logger committing to `sinks` (one sink or a sequence of them)
    #[must_use]
    pub fn new(sinks: impl IntoSinks<R>, render: Renderer<R>) -> Self {
        Self::from_parts(sinks, render, Vec::new(), Vec::new())
    }

    /// Create a logger with initial context and condition stacks
    #[must_use]
    pub fn from_parts(
        sinks: impl IntoSinks<R>,
        render: Renderer<R>,
        contexts: Vec<Context>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            sinks: Arc::new(sinks.into_sinks()),
            render,
            contexts: Arc::new(contexts),
            conditions: Arc::new(conditions),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder<R> {
        LoggerBuilder::new()
    }

    pub fn sinks(&self) -> &[Sink<R>] {
        &self.sinks
    }

    pub fn renderer(&self) -> &Renderer<R> {
        &self.render
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether two loggers are the same value, not merely equal in state
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sinks, &other.sinks)
            && self.render.ptr_eq(&other.render)
            && Arc::ptr_eq(&self.contexts, &other.contexts)
            && Arc::ptr_eq(&self.conditions, &other.conditions)
    }

    // ------------------------------------------------------------------
    // Severity methods
    // ------------------------------------------------------------------

    /// Issue one log call at `level`
    pub fn at(&self, level: Level, messages: impl IntoMessages) -> LogHandle<R> {
        let completion = self.dispatch(level, messages.into_messages());
        LogHandle::new(self.clone(), completion)
    }

    #[inline]
    pub fn fatal(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Fatal, messages)
    }

    #[inline]
    pub fn error(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Error, messages)
    }

    #[inline]
    pub fn warn(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Warn, messages)
    }

    #[inline]
    pub fn info(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Info, messages)
    }

    /// Like [`info`](Self::info), but tagged with the distinct `Log` level
    #[inline]
    pub fn log(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Log, messages)
    }

    #[inline]
    pub fn verbose(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Verbose, messages)
    }

    #[inline]
    pub fn debug(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Debug, messages)
    }

    #[inline]
    pub fn trace(&self, messages: impl IntoMessages) -> LogHandle<R> {
        self.at(Level::Trace, messages)
    }

    fn dispatch(&self, level: Level, messages: Vec<Value>) -> Completion {
        match self.admits(level) {
            Ok(true) => {}
            Ok(false) => return Completion::ok(),
            Err(err) => return Completion::Settled(Err(err)),
        }

        let contexts: Vec<Value> = self
            .contexts
            .iter()
            .map(|context| context.materialize(level))
            .collect();

        match self.render.render(level, &contexts, &messages) {
            Ok(rendered) => commit::commit_all(&self.sinks, level, Arc::new(rendered)),
            Err(err) => Completion::Settled(Err(err)),
        }
    }

    /// Evaluate the condition stack in order, stopping at the first miss
    fn admits(&self, level: Level) -> Result<bool> {
        for (index, condition) in self.conditions.iter().enumerate() {
            let pass = condition
                .evaluate(level)
                .map_err(|err| LoggerError::from_boxed(err, |source| LoggerError::ConditionFailed { index, source }))?;
            if !pass {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------

    /// A logger with `context` pushed onto the context stack.
    ///
    /// `()` and `None` push nothing; the result is still a new logger.
    #[must_use]
    pub fn fork(&self, context: impl IntoContext) -> Self {
        let mut contexts = self.contexts.as_ref().clone();
        contexts.extend(context.into_context());

        Self {
            sinks: Arc::clone(&self.sinks),
            render: self.render.clone(),
            contexts: Arc::new(contexts),
            conditions: Arc::new(self.conditions.as_ref().clone()),
        }
    }

    /// Alias for [`fork`](Self::fork)
    #[deprecated(since = "0.1.0", note = "Use fork() instead")]
    #[must_use]
    pub fn push(&self, context: impl IntoContext) -> Self {
        self.fork(context)
    }

    /// Alias for [`fork`](Self::fork)
    #[must_use]
    pub fn module(&self, context: impl IntoContext) -> Self {
        self.fork(context)
    }

    /// A logger that only commits calls passing `condition` as well as every
    /// condition already on the stack.
    ///
    /// `condition` may be a `bool`, a [`Level`] floor or a
    /// [`Condition`]; `()` and `None` add nothing.
    #[must_use]
    pub fn r#if(&self, condition: impl IntoCondition) -> Self {
        let mut conditions = self.conditions.as_ref().clone();
        conditions.extend(condition.into_condition());

        Self {
            sinks: Arc::clone(&self.sinks),
            render: self.render.clone(),
            contexts: Arc::new(self.contexts.as_ref().clone()),
            conditions: Arc::new(conditions),
        }
    }

    /// Alias for [`r#if`](Self::r#if)
    #[must_use]
    pub fn when(&self, condition: impl IntoCondition) -> Self {
        self.r#if(condition)
    }

    /// A logger that also commits to `sinks`, appended in order. Accepts
    /// the same forms as [`Logger::new`]: one sink, an array, a `Vec` or `()`.
    ///
    /// With no sinks the receiver itself is returned.
    #[must_use]
    pub fn to(&self, sinks: impl IntoSinks<R>) -> Self {
        let sinks = sinks.into_sinks();
        if sinks.is_empty() {
            return self.clone();
        }

        let mut all = self.sinks.as_ref().clone();
        all.extend(sinks);

        Self {
            sinks: Arc::new(all),
            render: self.render.clone(),
            contexts: Arc::clone(&self.contexts),
            conditions: Arc::clone(&self.conditions),
        }
    }

    /// Drive `self` and `other` from one call site.
    ///
    /// The returned logger starts with this logger's contexts and conditions.
    /// Each call renders with both renderers against its own contexts, then
    /// starts this logger's sinks before `other`'s. The call's handle
    /// finishes once both sides have.
    #[must_use]
    pub fn sequence<S>(&self, other: &Logger<S>) -> Logger<(Arc<R>, Arc<S>)>
    where
        S: Send + Sync + 'static,
    {
        let (left_render, right_render) = (self.render.clone(), other.render.clone());
        let render = Renderer::try_new(move |level: Level, contexts: &[Value], messages: &[Value]| {
            let left = left_render.render(level, contexts, messages)?;
            let right = right_render.render(level, contexts, messages)?;
            Ok((Arc::new(left), Arc::new(right)))
        });

        let (left_sinks, right_sinks) = (Arc::clone(&self.sinks), Arc::clone(&other.sinks));
        let sink = Sink::pipeline(move |level, pair: Arc<(Arc<R>, Arc<S>)>| {
            let left = commit::commit_all(&left_sinks, level, Arc::clone(&pair.0));
            let right = commit::commit_all(&right_sinks, level, Arc::clone(&pair.1));
            Completion::join_all(vec![left, right])
        });

        Logger {
            sinks: Arc::new(vec![sink]),
            render,
            contexts: Arc::clone(&self.contexts),
            conditions: Arc::clone(&self.conditions),
        }
    }
}

impl<R> Clone for Logger<R> {
    fn clone(&self) -> Self {
        Self {
            sinks: Arc::clone(&self.sinks),
            render: self.render.clone(),
            contexts: Arc::clone(&self.contexts),
            conditions: Arc::clone(&self.conditions),
        }
    }
}

impl<R> fmt::Debug for Logger<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.sinks.len())
            .field("contexts", &self.contexts)
            .field("conditions", &self.conditions)
            .finish()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use logweave::{renderers, sinks, Level, Logger};
///
/// let logger: Logger<String> = Logger::builder()
///     .render(renderers::bracketed())
///     .sink(sinks::nowhere())
///     .context("worker-1")
///     .min_level(Level::Debug)
///     .build()
///     .expect("renderer configured");
///
/// assert_eq!(logger.contexts().len(), 1);
/// ```
pub struct LoggerBuilder<R> {
    render: Option<Renderer<R>>,
    sinks: Vec<Sink<R>>,
    contexts: Vec<Context>,
    conditions: Vec<Condition>,
}

impl<R: Send + Sync + 'static> LoggerBuilder<R> {
    /// Create a new builder with no renderer, sinks, contexts or conditions
    pub fn new() -> Self {
        Self {
            render: None,
            sinks: Vec::new(),
            contexts: Vec::new(),
            conditions: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn render(mut self, render: Renderer<R>) -> Self {
        self.render = Some(render);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink<R>) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sinks(mut self, sinks: impl IntoSinks<R>) -> Self {
        self.sinks.extend(sinks.into_sinks());
        self
    }

    /// Push a context, following the same absent rule as `Logger::fork`
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl IntoContext) -> Self {
        self.contexts.extend(context.into_context());
        self
    }

    /// Push a condition, following the same absent rule as `Logger::if`
    #[must_use = "builder methods return a new value"]
    pub fn condition(mut self, condition: impl IntoCondition) -> Self {
        self.conditions.extend(condition.into_condition());
        self
    }

    /// Shorthand for a `Level` floor condition
    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: Level) -> Self {
        self.condition(level)
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::InvalidConfiguration` if no renderer was set.
    pub fn build(self) -> Result<Logger<R>> {
        let render = self
            .render
            .ok_or_else(|| LoggerError::config("LoggerBuilder", "no renderer configured"))?;
        Ok(Logger::from_parts(self.sinks, render, self.contexts, self.conditions))
    }
}

impl<R: Send + Sync + 'static> Default for LoggerBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
