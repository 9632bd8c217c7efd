//! Core logger types and traits

pub(crate) mod commit;
pub mod condition;
pub mod context;
pub mod error;
pub mod handle;
pub mod level;
pub mod logger;
pub mod message;
pub mod render;
pub mod sink;
pub mod timestamp;
pub mod value;

pub use condition::{Condition, IntoCondition};
pub use context::{Context, IntoContext};
pub use error::{BoxError, LoggerError, Result};
pub use handle::LogHandle;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use message::IntoMessages;
pub use render::Renderer;
pub use sink::{AsyncCommit, Commit, CommitResult, Done, IntoSinks, Sink, SinkKind};
pub use timestamp::TimestampFormat;
pub use value::{Fields, Value};
