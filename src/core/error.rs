//! Error types for the logger algebra

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Error type returned by user-supplied sinks, renderers and conditions
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A sink reported a failure, either by returning an error or by
    /// completing its callback with one
    #[error("Sink #{index} failed to commit: {source}")]
    SinkFailed {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// A callback-style sink dropped its completion handle without reporting
    #[error("Sink #{index} dropped its completion handle without reporting")]
    CallbackDropped { index: usize },

    /// A spawned sink task panicked or was cancelled by the runtime
    #[error("Sink #{index} task aborted: {message}")]
    SinkAborted { index: usize, message: String },

    /// The renderer failed
    #[error("Renderer failed: {0}")]
    RenderFailed(#[source] BoxError),

    /// A condition predicate failed to evaluate
    #[error("Condition #{index} failed to evaluate: {source}")]
    ConditionFailed {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Unwrap a boxed error that already is a `LoggerError`, otherwise
    /// classify it with `wrap`.
    ///
    /// Nested pipelines (see `Logger::sequence`) surface the inner failure
    /// unchanged instead of wrapping it once per level.
    pub(crate) fn from_boxed(err: BoxError, wrap: impl FnOnce(BoxError) -> Self) -> Self {
        match err.downcast::<LoggerError>() {
            Ok(inner) => *inner,
            Err(other) => wrap(other),
        }
    }

    /// Create a sink failure error
    pub fn sink(index: usize, source: impl Into<BoxError>) -> Self {
        LoggerError::SinkFailed {
            index,
            source: source.into(),
        }
    }

    /// Create a render failure error
    pub fn render(source: impl Into<BoxError>) -> Self {
        LoggerError::RenderFailed(source.into())
    }

    /// Create a condition failure error
    pub fn condition(index: usize, source: impl Into<BoxError>) -> Self {
        LoggerError::ConditionFailed {
            index,
            source: source.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
