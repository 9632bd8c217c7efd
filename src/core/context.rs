//! Context stack elements

use super::{level::Level, value::Value};
use std::fmt;
use std::sync::Arc;

type Producer = Arc<dyn Fn(Level) -> Value + Send + Sync>;

/// One element of a logger's context stack.
///
/// A `Producer` is invoked once per log call that reaches rendering, with the
/// level of that call, and its result takes its place in the rendered stack.
#[derive(Clone)]
pub enum Context {
    Value(Value),
    Producer(Producer),
}

impl Context {
    /// Wrap a closure as a lazily evaluated context element
    ///
    /// # Example
    ///
    /// ```
    /// use logweave::{Context, Level, Value};
    ///
    /// let ctx = Context::producer(|level| Value::from(level.to_str()));
    /// assert_eq!(ctx.materialize(Level::Warn), Value::from("WARN"));
    /// ```
    pub fn producer<F, V>(f: F) -> Self
    where
        F: Fn(Level) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Context::Producer(Arc::new(move |level: Level| -> Value { f(level).into() }))
    }

    pub fn materialize(&self, level: Level) -> Value {
        match self {
            Context::Value(value) => value.clone(),
            Context::Producer(produce) => produce(level),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Context::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Conversion accepted by `Logger::fork`.
///
/// `()` and `None` stand for an absent context and append nothing.
pub trait IntoContext {
    fn into_context(self) -> Option<Context>;
}

impl IntoContext for Context {
    fn into_context(self) -> Option<Context> {
        Some(self)
    }
}

impl IntoContext for () {
    fn into_context(self) -> Option<Context> {
        None
    }
}

impl<T: IntoContext> IntoContext for Option<T> {
    fn into_context(self) -> Option<Context> {
        self.and_then(IntoContext::into_context)
    }
}

macro_rules! value_into_context {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoContext for $ty {
                fn into_context(self) -> Option<Context> {
                    Some(Context::Value(self.into()))
                }
            }
        )*
    };
}

value_into_context!(Value, &str, String, &String, i64, i32, u32, f64, bool, super::value::Fields);
