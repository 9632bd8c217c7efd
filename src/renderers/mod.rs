//! Ready-made renderers and context producers

pub mod bracketed;
pub mod json;
pub mod producers;

pub use bracketed::bracketed;
pub use json::json;
pub use producers::{level, timestamp, timestamp_with};
