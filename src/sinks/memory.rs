//! In-memory capture sink

use crate::core::{Level, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// One captured commit
#[derive(Debug, Clone, PartialEq)]
pub struct Record<R> {
    pub level: Level,
    pub rendered: R,
}

/// Keeps every committed `(level, rendered)` pair in order.
///
/// Clones share the same buffer, so the sink can be handed to a logger while
/// the test keeps a clone to inspect.
#[derive(Debug)]
pub struct MemorySink<R> {
    records: Arc<Mutex<Vec<Record<R>>>>,
}

impl<R: Clone + Send + Sync + 'static> MemorySink<R> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A sink appending into this buffer
    pub fn sink(&self) -> Sink<R> {
        let records = Arc::clone(&self.records);
        Sink::sync(move |level, rendered: &R| {
            records.lock().push(Record {
                level,
                rendered: rendered.clone(),
            });
            Ok(())
        })
    }

    pub fn records(&self) -> Vec<Record<R>> {
        self.records.lock().clone()
    }

    pub fn rendered(&self) -> Vec<R> {
        self.records.lock().iter().map(|r| r.rendered.clone()).collect()
    }

    pub fn levels(&self) -> Vec<Level> {
        self.records.lock().iter().map(|r| r.level).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl<R> Clone for MemorySink<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: Clone + Send + Sync + 'static> Default for MemorySink<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_in_order() {
        let memory = MemorySink::new();
        let sink = memory.sink();

        for (i, level) in [Level::Info, Level::Warn].into_iter().enumerate() {
            let completion = sink.start(i, level, &Arc::new(format!("line {}", i)));
            assert!(completion.is_settled());
        }

        assert_eq!(memory.levels(), vec![Level::Info, Level::Warn]);
        assert_eq!(memory.rendered(), vec!["line 0".to_string(), "line 1".to_string()]);

        memory.clear();
        assert!(memory.is_empty());
    }
}
