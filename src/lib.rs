//! # logweave
//!
//! A small structured-logging library built around an immutable logger value.
//!
//! ## Features
//!
//! - **Immutable Loggers**: `fork`, `r#if`, `to` and `sequence` return new
//!   loggers and never touch the receiver
//! - **Render Once**: every call renders a single value shared by all sinks
//! - **Mixed Sinks**: synchronous, awaitable and callback-style sinks on the
//!   same logger
//! - **Chainable Handles**: log calls return a handle that can be awaited or
//!   used to issue further calls
//!
//! ```
//! use logweave::{renderers, sinks::MemorySink};
//!
//! let memory = MemorySink::new();
//! let log = logweave::with_renderer(renderers::bracketed())
//!     .to([memory.sink()])
//!     .fork("db");
//!
//! log.info(("connected to", "primary")).wait().unwrap();
//! assert_eq!(memory.rendered(), vec!["[db] connected to primary".to_string()]);
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod renderers;
pub mod sinks;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::{
        AsyncCommit, BoxError, Commit, CommitResult, Condition, Context, Done, Fields,
        IntoCondition, IntoContext, IntoMessages, IntoSinks, Level, LogHandle, Logger,
        LoggerBuilder, LoggerError, Renderer, Result, Sink, SinkKind, TimestampFormat, Value,
    };
}

pub use config::Config;
pub use core::{
    AsyncCommit, BoxError, Commit, CommitResult, Condition, Context, Done, Fields, IntoCondition,
    IntoContext, IntoMessages, IntoSinks, Level, LogHandle, Logger, LoggerBuilder, LoggerError,
    Renderer, Result, Sink, SinkKind, TimestampFormat, Value,
};

/// A logger rendering with `render` and committing nowhere yet; add sinks
/// with [`Logger::to`].
pub fn with_renderer<R: Send + Sync + 'static>(render: Renderer<R>) -> Logger<R> {
    Logger::new((), render)
}

/// The bundled default logger: timestamp and level contexts, bracketed lines,
/// written to the console.
pub fn console() -> Logger<String> {
    Config::default().build()
}
