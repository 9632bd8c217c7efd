//! Async sinks example
//!
//! Demonstrates awaitable and callback-style sinks alongside a synchronous
//! console sink, and sequencing a text logger with a JSON logger.
//!
//! Run with: cargo run --example async_sinks

use async_trait::async_trait;
use logweave::prelude::*;
use logweave::renderers;
use logweave::sinks::ConsoleSink;
use std::sync::Arc;
use std::time::Duration;

/// Pretends to ship JSON lines to a collector
struct Collector {
    latency: Duration,
}

#[async_trait]
impl AsyncCommit<String> for Collector {
    async fn commit(&self, level: Level, rendered: Arc<String>) -> CommitResult {
        tokio::time::sleep(self.latency).await;
        println!("   collector <- {} {}", level, rendered);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== logweave - Async Sinks Example ===\n");

    let console = logweave::with_renderer(renderers::bracketed())
        .to([ConsoleSink::new().sink()])
        .fork(renderers::timestamp());

    println!("1. Awaiting an async sink:");
    let shipped = logweave::with_renderer(renderers::json()).to([Sink::from_async_commit(Collector {
        latency: Duration::from_millis(20),
    })]);
    shipped.info(("user", 42, "logged in")).await?;

    println!("\n2. Callback-style sink completed from a task:");
    let deferred = console.to([Sink::callback(|_, rendered: Arc<String>, done: Done| {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            println!("   acknowledged: {}", rendered);
            done.ok();
        });
    })]);
    deferred.warn("disk at 91%").await?;

    println!("\n3. Failures surface through the handle:");
    let flaky = console.to([Sink::future(|_, _| async {
        Err::<(), BoxError>("collector unreachable".into())
    })]);
    if let Err(err) = flaky.error("payment declined").await {
        println!("   handle reported: {}", err);
    }

    println!("\n4. One call site, two loggers:");
    let both = console.fork("api").sequence(&shipped);
    both.info(("request served in", 12, "ms")).await?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
