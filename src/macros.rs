//! Logging macros for heterogeneous message lists.
//!
//! Each argument is converted with `Value::from`, so strings, numbers, bools
//! and `Fields` can be mixed freely. The macros evaluate to the call's
//! [`LogHandle`](crate::LogHandle).
//!
//! # Examples
//!
//! ```
//! use logweave::{info, renderers, sinks::MemorySink};
//!
//! let memory = MemorySink::new();
//! let logger = logweave::with_renderer(renderers::bracketed()).to([memory.sink()]);
//!
//! let port = 8080;
//! info!(logger, "listening on port", port);
//!
//! assert_eq!(memory.rendered(), vec!["listening on port 8080".to_string()]);
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use logweave::{renderers, Level};
/// # let logger = logweave::with_renderer(renderers::bracketed());
/// use logweave::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code:", 500);
/// log!(logger, Level::Trace);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)*) => {{
        let messages: ::std::vec::Vec<$crate::Value> = ::std::vec![$($crate::Value::from($arg)),*];
        $logger.at($level, messages)
    }};
}

/// Log a trace-level message.
///
/// ```
/// # let logger = logweave::with_renderer(logweave::renderers::bracketed());
/// use logweave::trace;
/// trace!(logger, "entering", "calculate()");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Trace $(, $arg)*)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Debug $(, $arg)*)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Verbose $(, $arg)*)
    };
}

/// Log an info-level message.
///
/// ```
/// # let logger = logweave::with_renderer(logweave::renderers::bracketed());
/// use logweave::info;
/// info!(logger, "processing", 100, "items");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Info $(, $arg)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Warn $(, $arg)*)
    };
}

/// Log an error-level message.
///
/// ```
/// # let logger = logweave::with_renderer(logweave::renderers::bracketed());
/// use logweave::error;
/// error!(logger, "code", 500, "message", "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Error $(, $arg)*)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log!($logger, $crate::Level::Fatal $(, $arg)*)
    };
}
