//! Sinks: the destinations a rendered log call is committed to

use super::{
    commit::{self, Completion},
    error::{BoxError, LoggerError},
    level::Level,
};
use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

/// What a sink reports back for one commit
pub type CommitResult = std::result::Result<(), BoxError>;

type SyncFn<R> = Arc<dyn Fn(Level, &R) -> CommitResult + Send + Sync>;
type AsyncFn<R> = Arc<dyn Fn(Level, Arc<R>) -> BoxFuture<'static, CommitResult> + Send + Sync>;
type CallbackFn<R> = Arc<dyn Fn(Level, Arc<R>, Done) + Send + Sync>;
type PipelineFn<R> = Arc<dyn Fn(Level, Arc<R>) -> Completion + Send + Sync>;

/// Trait for synchronous struct sinks
pub trait Commit<R>: Send + Sync {
    fn commit(&self, level: Level, rendered: &R) -> CommitResult;
}

/// Trait for asynchronous struct sinks
///
/// # Example
///
/// ```no_run
/// use logweave::{AsyncCommit, CommitResult, Level};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Remote;
///
/// #[async_trait]
/// impl AsyncCommit<String> for Remote {
///     async fn commit(&self, level: Level, rendered: Arc<String>) -> CommitResult {
///         // ship `rendered` somewhere
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncCommit<R: Send + Sync + 'static>: Send + Sync {
    async fn commit(&self, level: Level, rendered: Arc<R>) -> CommitResult;
}

/// Completion handle handed to callback-style sinks.
///
/// Dropping it without calling one of its methods fails the commit with
/// `LoggerError::CallbackDropped`.
#[derive(Debug)]
pub struct Done {
    tx: oneshot::Sender<CommitResult>,
}

impl Done {
    pub fn complete(self, result: CommitResult) {
        // The receiver is gone only if nobody waits for this call anymore
        let _ = self.tx.send(result);
    }

    pub fn ok(self) {
        self.complete(Ok(()));
    }

    pub fn fail(self, err: impl Into<BoxError>) {
        self.complete(Err(err.into()));
    }
}

/// How a sink signals completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Finished when the call returns
    Sync,
    /// Finished when the returned future resolves
    Async,
    /// Finished when the `Done` handle is completed
    Callback,
    /// Finished when a nested logger's pipeline finishes
    Pipeline,
}

enum Dispatch<R> {
    Sync(SyncFn<R>),
    Async(AsyncFn<R>),
    Callback(CallbackFn<R>),
    Pipeline(PipelineFn<R>),
}

/// A commit destination, tagged with its completion style
pub struct Sink<R> {
    dispatch: Dispatch<R>,
}

impl<R: Send + Sync + 'static> Sink<R> {
    /// A sink that completes before returning
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(Level, &R) -> CommitResult + Send + Sync + 'static,
    {
        Self {
            dispatch: Dispatch::Sync(Arc::new(f)),
        }
    }

    /// A sink that returns a future; its resolution completes the commit
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(Level, Arc<R>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommitResult> + Send + 'static,
    {
        Self {
            dispatch: Dispatch::Async(Arc::new(move |level: Level, rendered: Arc<R>| {
                f(level, rendered).boxed()
            })),
        }
    }

    /// A sink that reports completion through a `Done` handle, possibly
    /// from another thread or task
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(Level, Arc<R>, Done) + Send + Sync + 'static,
    {
        Self {
            dispatch: Dispatch::Callback(Arc::new(f)),
        }
    }

    pub fn from_commit<C>(sink: C) -> Self
    where
        C: Commit<R> + 'static,
    {
        Self::sync(move |level, rendered| sink.commit(level, rendered))
    }

    pub fn from_async_commit<C>(sink: C) -> Self
    where
        C: AsyncCommit<R> + 'static,
    {
        let sink = Arc::new(sink);
        Self::future(move |level, rendered| {
            let sink = Arc::clone(&sink);
            async move { sink.commit(level, rendered).await }
        })
    }

    pub(crate) fn pipeline<F>(f: F) -> Self
    where
        F: Fn(Level, Arc<R>) -> Completion + Send + Sync + 'static,
    {
        Self {
            dispatch: Dispatch::Pipeline(Arc::new(f)),
        }
    }

    pub fn kind(&self) -> SinkKind {
        match self.dispatch {
            Dispatch::Sync(_) => SinkKind::Sync,
            Dispatch::Async(_) => SinkKind::Async,
            Dispatch::Callback(_) => SinkKind::Callback,
            Dispatch::Pipeline(_) => SinkKind::Pipeline,
        }
    }

    /// Start this sink as sink number `index` of a log call
    pub(crate) fn start(&self, index: usize, level: Level, rendered: &Arc<R>) -> Completion {
        let classify = move |err: BoxError| {
            LoggerError::from_boxed(err, |source| LoggerError::SinkFailed { index, source })
        };

        match &self.dispatch {
            Dispatch::Sync(run) => Completion::Settled(run(level, &**rendered).map_err(classify)),
            Dispatch::Async(run) => {
                let mut pending = run(level, Arc::clone(rendered));
                // The first poll happens here so the sink starts inside the
                // log call, in call order, whether or not a runtime exists
                let mut cx = TaskContext::from_waker(futures::task::noop_waker_ref());
                match pending.poll_unpin(&mut cx) {
                    Poll::Ready(result) => Completion::Settled(result.map_err(classify)),
                    Poll::Pending => {
                        let task = async move { pending.await.map_err(classify) }.boxed();
                        Completion::Pending(commit::launch(index, task))
                    }
                }
            }
            Dispatch::Callback(run) => {
                let (tx, mut rx) = oneshot::channel();
                run(level, Arc::clone(rendered), Done { tx });
                match rx.try_recv() {
                    Ok(Some(result)) => Completion::Settled(result.map_err(classify)),
                    Ok(None) => Completion::Pending(
                        async move {
                            match rx.await {
                                Ok(result) => result.map_err(classify),
                                Err(oneshot::Canceled) => Err(LoggerError::CallbackDropped { index }),
                            }
                        }
                        .boxed(),
                    ),
                    Err(oneshot::Canceled) => {
                        Completion::Settled(Err(LoggerError::CallbackDropped { index }))
                    }
                }
            }
            Dispatch::Pipeline(run) => run(level, Arc::clone(rendered)),
        }
    }
}

impl<R> Clone for Sink<R> {
    fn clone(&self) -> Self {
        let dispatch = match &self.dispatch {
            Dispatch::Sync(f) => Dispatch::Sync(Arc::clone(f)),
            Dispatch::Async(f) => Dispatch::Async(Arc::clone(f)),
            Dispatch::Callback(f) => Dispatch::Callback(Arc::clone(f)),
            Dispatch::Pipeline(f) => Dispatch::Pipeline(Arc::clone(f)),
        };
        Self { dispatch }
    }
}

impl<R> fmt::Debug for Sink<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.dispatch {
            Dispatch::Sync(_) => "Sync",
            Dispatch::Async(_) => "Async",
            Dispatch::Callback(_) => "Callback",
            Dispatch::Pipeline(_) => "Pipeline",
        };
        write!(f, "Sink::{}(..)", kind)
    }
}

/// Conversion accepted by `Logger::new` and `Logger::to`: a single sink or a
/// sequence of them
pub trait IntoSinks<R> {
    fn into_sinks(self) -> Vec<Sink<R>>;
}

impl<R> IntoSinks<R> for Sink<R> {
    fn into_sinks(self) -> Vec<Sink<R>> {
        vec![self]
    }
}

impl<R> IntoSinks<R> for Vec<Sink<R>> {
    fn into_sinks(self) -> Vec<Sink<R>> {
        self
    }
}

impl<R, const N: usize> IntoSinks<R> for [Sink<R>; N] {
    fn into_sinks(self) -> Vec<Sink<R>> {
        self.into_iter().collect()
    }
}

impl<R> IntoSinks<R> for () {
    fn into_sinks(self) -> Vec<Sink<R>> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn start(sink: &Sink<String>) -> Completion {
        sink.start(0, Level::Info, &Arc::new("rendered".to_string()))
    }

    #[test]
    fn test_sync_sink_settles_immediately() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let sink = Sink::sync(move |_, rendered: &String| {
            assert_eq!(rendered, "rendered");
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(sink.kind(), SinkKind::Sync);
        assert!(matches!(start(&sink), Completion::Settled(Ok(()))));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_completed_inline_settles() {
        let sink: Sink<String> = Sink::callback(|_, _, done| done.fail("refused"));
        match start(&sink) {
            Completion::Settled(Err(LoggerError::SinkFailed { index: 0, source })) => {
                assert_eq!(source.to_string(), "refused");
            }
            _ => panic!("expected a settled sink failure"),
        }
    }

    #[test]
    fn test_callback_dropped_done() {
        let sink: Sink<String> = Sink::callback(|_, _, done| drop(done));
        assert!(matches!(
            start(&sink),
            Completion::Settled(Err(LoggerError::CallbackDropped { index: 0 }))
        ));
    }

    #[test]
    fn test_callback_completed_later() {
        let parked = Arc::new(parking_lot::Mutex::new(None));
        let slot = Arc::clone(&parked);
        let sink: Sink<String> = Sink::callback(move |_, _, done| {
            *slot.lock() = Some(done);
        });

        let completion = start(&sink);
        assert!(!completion.is_settled());

        let done = parked.lock().take().expect("callback ran");
        std::thread::spawn(move || done.ok()).join().unwrap();

        assert!(futures::executor::block_on(completion.into_task()).is_ok());
    }

    #[test]
    fn test_future_sink_outside_runtime() {
        let sink: Sink<String> = Sink::future(|level, rendered: Arc<String>| async move {
            assert_eq!(level, Level::Info);
            assert_eq!(rendered.as_str(), "rendered");
            Ok(())
        });

        assert_eq!(sink.kind(), SinkKind::Async);
        assert!(matches!(start(&sink), Completion::Settled(Ok(()))));
    }

    #[test]
    fn test_future_sink_starts_before_start_returns() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&started);
        let (tx, rx) = oneshot::channel::<()>();
        let rx = Arc::new(parking_lot::Mutex::new(Some(rx)));
        let sink: Sink<String> = Sink::future(move |_, _| {
            let counter = Arc::clone(&counter);
            let gate = rx.lock().take();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(())
            }
        });

        let completion = start(&sink);
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert!(!completion.is_settled());

        tx.send(()).unwrap();
        assert!(futures::executor::block_on(completion.into_task()).is_ok());
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }
}
