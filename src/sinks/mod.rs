//! Ready-made sinks

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "log-facade")]
pub mod log_facade;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
#[cfg(feature = "log-facade")]
pub use log_facade::LogFacadeSink;
pub use memory::{MemorySink, Record};

use crate::core::Sink;

/// A sink that discards everything
pub fn nowhere<R: Send + Sync + 'static>() -> Sink<R> {
    Sink::sync(|_, _| Ok(()))
}
