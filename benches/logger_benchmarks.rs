//! Criterion benchmarks for logweave

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logweave::prelude::*;
use logweave::renderers;
use logweave::sinks::{self, MemorySink};

fn base_logger() -> Logger<String> {
    logweave::with_renderer(renderers::bracketed()).to([sinks::nowhere()])
}

// ============================================================================
// Combinator Benchmarks
// ============================================================================

fn bench_combinators(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinators");
    group.throughput(Throughput::Elements(1));

    let logger = base_logger().fork("service").fork("request");

    group.bench_function("fork", |b| {
        b.iter(|| black_box(logger.fork(black_box("handler"))));
    });

    group.bench_function("if_floor", |b| {
        b.iter(|| black_box(logger.r#if(black_box(Level::Warn))));
    });

    group.bench_function("to_empty", |b| {
        b.iter(|| black_box(logger.to(Vec::new())));
    });

    group.bench_function("sequence", |b| {
        let other = logweave::with_renderer(renderers::json()).to([sinks::nowhere()]);
        b.iter(|| black_box(logger.sequence(&other)));
    });

    group.finish();
}

// ============================================================================
// Log Call Benchmarks
// ============================================================================

fn bench_log_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_calls");
    group.throughput(Throughput::Elements(1));

    let logger = base_logger();
    let gated = logger.r#if(Level::Error);

    group.bench_function("gated_out", |b| {
        b.iter(|| gated.debug(black_box("dropped")));
    });

    group.bench_function("bracketed_nowhere", |b| {
        b.iter(|| logger.info(black_box(("user", 42, "logged in"))));
    });

    let with_producers = logger.fork(renderers::timestamp()).fork(renderers::level());
    group.bench_function("with_producers", |b| {
        b.iter(|| with_producers.info(black_box("hello")));
    });

    let json = logweave::with_renderer(renderers::json()).to([sinks::nowhere()]).fork("api");
    group.bench_function("json_nowhere", |b| {
        b.iter(|| json.warn(black_box(("slow", 1200))));
    });

    group.finish();
}

// ============================================================================
// Fan-out Benchmarks
// ============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for sink_count in [1usize, 4, 16] {
        let memory = MemorySink::new();
        let logger = logweave::with_renderer(renderers::bracketed())
            .to((0..sink_count).map(|_| memory.sink()).collect::<Vec<_>>());

        group.throughput(Throughput::Elements(sink_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sink_count), &sink_count, |b, _| {
            b.iter(|| {
                logger.info(black_box("fan out"));
                memory.clear();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Async Sink Benchmarks
// ============================================================================

fn bench_async_sinks(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_sinks");
    group.throughput(Throughput::Elements(1));

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let logger = logweave::with_renderer(renderers::bracketed())
        .to([Sink::future(|_, _| async { Ok(()) })]);

    group.bench_function("future_awaited", |b| {
        b.iter(|| {
            runtime.block_on(async { logger.info(black_box("async")).await })
        });
    });

    let callback = logweave::with_renderer(renderers::bracketed())
        .to([Sink::callback(|_, _, done: Done| done.ok())]);
    group.bench_function("callback_inline", |b| {
        b.iter(|| callback.info(black_box("callback")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_combinators,
    bench_log_calls,
    bench_fan_out,
    bench_async_sinks
);

criterion_main!(benches);
