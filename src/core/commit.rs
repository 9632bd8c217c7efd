//! Commit pipeline: starts every sink of a log call and combines their
//! completions into one.

use super::{
    error::{LoggerError, Result},
    level::Level,
    sink::Sink,
};
use futures::executor::ThreadPool;
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::{Arc, OnceLock};

pub(crate) type Task = BoxFuture<'static, Result<()>>;

/// Outcome of starting one or more sinks
pub(crate) enum Completion {
    /// Every sink involved has already finished
    Settled(Result<()>),
    /// At least one sink is still running
    Pending(Task),
}

impl Completion {
    pub(crate) fn ok() -> Self {
        Completion::Settled(Ok(()))
    }

    /// Combine completions; the result fails with the first failure observed.
    ///
    /// Already settled failures count as observed first. Pending parts are
    /// always driven to the end, a failure never cancels its siblings.
    pub(crate) fn join_all(parts: Vec<Completion>) -> Self {
        let mut first_error = None;
        let mut pending = Vec::new();

        for part in parts {
            match part {
                Completion::Settled(Ok(())) => {}
                Completion::Settled(Err(err)) => {
                    first_error.get_or_insert(err);
                }
                Completion::Pending(task) => pending.push(task),
            }
        }

        if pending.is_empty() {
            return Completion::Settled(first_error.map_or(Ok(()), Err));
        }

        Completion::Pending(
            async move {
                let mut first_error = first_error;
                let mut running: FuturesUnordered<Task> = pending.into_iter().collect();
                while let Some(result) = running.next().await {
                    if let Err(err) = result {
                        first_error.get_or_insert(err);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
            .boxed(),
        )
    }

    pub(crate) fn is_settled(&self) -> bool {
        matches!(self, Completion::Settled(_))
    }

    pub(crate) fn into_task(self) -> Task {
        match self {
            Completion::Settled(result) => future::ready(result).boxed(),
            Completion::Pending(task) => task,
        }
    }
}

/// Start every sink in order with the same rendered value
pub(crate) fn commit_all<R>(sinks: &[Sink<R>], level: Level, rendered: Arc<R>) -> Completion
where
    R: Send + Sync + 'static,
{
    let parts = sinks
        .iter()
        .enumerate()
        .map(|(index, sink)| sink.start(index, level, &rendered))
        .collect();
    Completion::join_all(parts)
}

/// Hand a still pending sink future to the current Tokio runtime so it
/// makes progress even if nobody awaits the handle. Outside a runtime the
/// future is returned unchanged and runs when the handle is awaited or
/// dropped.
pub(crate) fn launch(index: usize, task: Task) -> Task {
    match spawn_on_runtime(index, task) {
        Ok(joined) | Err(joined) => joined,
    }
}

#[cfg(feature = "tokio")]
fn spawn_on_runtime(index: usize, task: Task) -> std::result::Result<Task, Task> {
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            let join = runtime.spawn(task);
            Ok(async move {
                match join.await {
                    Ok(result) => result,
                    Err(err) => Err(LoggerError::SinkAborted {
                        index,
                        message: err.to_string(),
                    }),
                }
            }
            .boxed())
        }
        Err(_) => Err(task),
    }
}

#[cfg(not(feature = "tokio"))]
fn spawn_on_runtime(_index: usize, task: Task) -> std::result::Result<Task, Task> {
    Err(task)
}

/// Let a commit nobody awaits run to completion without blocking the caller.
///
/// Inside a Tokio runtime the work is spawned there; otherwise it goes to a
/// shared background executor.
pub(crate) fn detach(task: Task) {
    let watched = async move {
        if let Err(err) = task.await {
            report_unobserved(&err);
        }
    }
    .boxed();

    if let Some(watched) = spawn_detached(watched) {
        run_in_background(watched);
    }
}

#[cfg(feature = "tokio")]
fn spawn_detached(task: BoxFuture<'static, ()>) -> Option<BoxFuture<'static, ()>> {
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(task);
            None
        }
        Err(_) => Some(task),
    }
}

#[cfg(not(feature = "tokio"))]
fn spawn_detached(task: BoxFuture<'static, ()>) -> Option<BoxFuture<'static, ()>> {
    Some(task)
}

fn background_pool() -> Option<&'static ThreadPool> {
    static POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();
    POOL.get_or_init(|| {
        ThreadPool::builder()
            .pool_size(1)
            .name_prefix("logweave-detached-")
            .create()
            .map_err(|err| eprintln!("[LOGWEAVE ERROR] Failed to start background executor: {}", err))
            .ok()
    })
    .as_ref()
}

fn run_in_background(task: BoxFuture<'static, ()>) {
    if let Some(pool) = background_pool() {
        pool.spawn_ok(task);
        return;
    }

    let spawned = std::thread::Builder::new()
        .name("logweave-detached".to_string())
        .spawn(move || futures::executor::block_on(task));
    if let Err(err) = spawned {
        eprintln!("[LOGWEAVE ERROR] Dropped an unawaited commit: {}", err);
    }
}

pub(crate) fn report_unobserved(err: &LoggerError) {
    eprintln!("[LOGWEAVE ERROR] Unobserved commit failure: {}", err);
}
