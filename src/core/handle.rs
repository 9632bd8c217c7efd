//! The value returned by every severity method

use super::{
    commit::{self, Completion, Task},
    error::Result,
    logger::Logger,
};
use futures::future::{self, FutureExt};
use std::fmt;
use std::future::IntoFuture;
use std::ops::Deref;

/// Handle to one log call.
///
/// It is both the call's completion (`.await` it, or [`wait`](Self::wait)
/// from synchronous code) and the logger it was issued on: severity methods
/// and combinators are reachable through `Deref`, so calls chain:
///
/// ```
/// use logweave::{renderers, sinks::MemorySink};
///
/// let memory = MemorySink::new();
/// let log = logweave::with_renderer(renderers::bracketed()).to([memory.sink()]);
///
/// log.info("starting").warn("low disk").error("giving up");
/// assert_eq!(memory.len(), 3);
/// ```
///
/// Chained calls do not wait for each other. Dropping a handle whose sinks
/// are still running neither cancels them nor blocks; they finish in the
/// background.
pub struct LogHandle<R> {
    logger: Logger<R>,
    completion: Option<Completion>,
}

impl<R> LogHandle<R> {
    pub(crate) fn new(logger: Logger<R>, completion: Completion) -> Self {
        Self {
            logger,
            completion: Some(completion),
        }
    }

    /// The logger this call was issued on
    pub fn logger(&self) -> &Logger<R> {
        &self.logger
    }

    /// Whether every sink of this call has already finished
    pub fn is_settled(&self) -> bool {
        self.completion.as_ref().map_or(true, Completion::is_settled)
    }

    /// Block the current thread until every sink of this call has finished.
    ///
    /// Must not be called from inside an async runtime worker; `.await` the
    /// handle there instead.
    pub fn wait(self) -> Result<()> {
        futures::executor::block_on(self.into_future())
    }

    fn take_task(&mut self) -> Task {
        match self.completion.take() {
            Some(completion) => completion.into_task(),
            None => future::ready(Ok(())).boxed(),
        }
    }
}

impl<R> Deref for LogHandle<R> {
    type Target = Logger<R>;

    fn deref(&self) -> &Logger<R> {
        &self.logger
    }
}

impl<R> IntoFuture for LogHandle<R> {
    type Output = Result<()>;
    type IntoFuture = Task;

    fn into_future(mut self) -> Task {
        self.take_task()
    }
}

impl<R> Drop for LogHandle<R> {
    fn drop(&mut self) {
        match self.completion.take() {
            None | Some(Completion::Settled(Ok(()))) => {}
            Some(Completion::Settled(Err(err))) => commit::report_unobserved(&err),
            Some(Completion::Pending(task)) => commit::detach(task),
        }
    }
}

impl<R> fmt::Debug for LogHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("logger", &self.logger)
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{BoxError, Done, Level, LoggerError, Renderer, Sink, Value};
    use crate::Logger;
    use futures::channel::oneshot;
    use parking_lot::Mutex;
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    fn logger(sinks: Vec<Sink<usize>>) -> Logger<usize> {
        Logger::new(sinks, Renderer::new(|_, _, messages: &[Value]| messages.len()))
    }

    #[test]
    fn test_gated_call_is_settled() {
        let handle = logger(vec![]).r#if(false).info("x");
        assert!(handle.is_settled());
        assert!(handle.wait().is_ok());
    }

    #[test]
    fn test_handle_exposes_receiver() {
        let log = logger(vec![]).fork("ctx");
        let handle = log.debug(());
        assert!(handle.logger().ptr_eq(&log));
        assert_eq!(handle.contexts().len(), 1);
    }

    #[test]
    fn test_dropping_pending_handle_does_not_block() {
        let parked: Arc<Mutex<Vec<Done>>> = Arc::new(Mutex::new(Vec::new()));
        let slot = Arc::clone(&parked);
        let log = logger(vec![Sink::callback(move |_, _, done: Done| slot.lock().push(done))]);

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            log.info("a");
            for done in parked.lock().drain(..) {
                done.ok();
            }
            let _ = tx.send(());
        });

        rx.recv_timeout(Duration::from_secs(3))
            .expect("a discarded handle must not block the caller");
    }

    #[test]
    fn test_dropped_handle_still_finishes_commit() {
        let (gate_tx, gate_rx) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some(gate_rx)));
        let (tx, rx) = mpsc::channel();
        let tx = Arc::new(Mutex::new(tx));
        let log = logger(vec![Sink::future(move |_, rendered: Arc<usize>| {
            let gate = gate.lock().take();
            let tx = Arc::clone(&tx);
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                let _ = tx.lock().send(*rendered);
                Ok(())
            }
        })]);

        let handle = log.at(Level::Warn, ("a", "b"));
        assert!(!handle.is_settled());
        drop(handle);

        gate_tx.send(()).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(3)), Ok(2));
    }

    #[tokio::test]
    async fn test_await_reports_failure() {
        let log = logger(vec![Sink::future(|_, _| async { Err::<(), BoxError>("offline".into()) })]);
        let err = log.error("x").await.unwrap_err();
        assert!(matches!(err, LoggerError::SinkFailed { index: 0, .. }));
    }
}
