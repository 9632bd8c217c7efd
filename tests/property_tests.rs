//! Property-based tests for logweave using proptest

use logweave::prelude::*;
use logweave::renderers;
use logweave::sinks::MemorySink;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

fn context_capture() -> (Logger<Vec<Value>>, MemorySink<Vec<Value>>) {
    let memory = MemorySink::new();
    let logger = Logger::new(
        memory.sink(),
        Renderer::new(|_, contexts: &[Value], _| contexts.to_vec()),
    );
    (logger, memory)
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level string conversions roundtrip
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: Level = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);

        let lower: Level = level.to_str().to_lowercase().parse().unwrap();
        prop_assert_eq!(level, lower);
    }

    /// Level ordering agrees with the discriminants
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
        prop_assert_eq!(a.cmp(&b), (a as u8).cmp(&(b as u8)));
    }

    /// Invalid level names are rejected
    #[test]
    fn test_invalid_level_rejected(s in "[a-z]{6,12}") {
        let known = ["verbose", "warning"];
        prop_assume!(!known.contains(&s.as_str()));
        prop_assert!(s.parse::<Level>().is_err());
    }
}

// ============================================================================
// Combinator Tests
// ============================================================================

proptest! {
    /// Forking never changes the receiver
    #[test]
    fn test_fork_immutability(
        base in prop::collection::vec("[a-z]{1,8}", 0..5),
        extra in prop::collection::vec("[a-z]{1,8}", 1..5),
        level in any_level(),
    ) {
        let (mut log, memory) = context_capture();
        for ctx in &base {
            log = log.fork(ctx.as_str());
        }

        let mut child = log.clone();
        for ctx in &extra {
            child = child.fork(ctx.as_str()).r#if(true);
        }
        let _ = log.r#if(false).to([logweave::sinks::nowhere()]);

        log.at(level, ());
        child.at(level, ());

        let captured = memory.rendered();
        let expected: Vec<Value> = base.iter().map(|s| Value::from(s.as_str())).collect();
        prop_assert_eq!(&captured[0], &expected);
        prop_assert_eq!(captured[1].len(), base.len() + extra.len());
        prop_assert_eq!(log.contexts().len(), base.len());
        prop_assert!(log.conditions().is_empty());
    }

    /// Adding a passing condition keeps a committing call committing, adding a
    /// failing one suppresses it
    #[test]
    fn test_condition_monotonicity(
        floor in any_level(),
        level in any_level(),
        extra_floor in any_level(),
    ) {
        let memory = MemorySink::new();
        let log = logweave::with_renderer(renderers::bracketed())
            .to([memory.sink()])
            .r#if(floor);

        log.at(level, ());
        let committed = memory.len() == 1;
        prop_assert_eq!(committed, level >= floor);

        memory.clear();
        log.r#if(extra_floor).at(level, ());
        let passes_extra = level >= extra_floor;
        prop_assert_eq!(memory.len() == 1, committed && passes_extra);

        memory.clear();
        log.r#if(false).at(level, ());
        prop_assert!(memory.is_empty());
    }

    /// The renderer runs once per committed call however many sinks there are
    #[test]
    fn test_render_once(k in 0usize..8, level in any_level()) {
        let renders = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&renders);
        let memory = MemorySink::new();

        let sinks: Vec<Sink<usize>> = (0..k).map(|_| memory.sink()).collect();
        let log = logweave::with_renderer(Renderer::new(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst)
        }))
        .to(sinks);

        log.at(level, "x").wait().unwrap();

        prop_assert_eq!(renders.load(Ordering::SeqCst), 1);
        prop_assert_eq!(memory.len(), k);
        prop_assert!(memory.rendered().iter().all(|&n| n == 0));
    }

    /// `to` with nothing returns the receiver itself
    #[test]
    fn test_to_identity(ctx in "[a-z]{1,8}") {
        let log = logweave::with_renderer(renderers::bracketed()).fork(ctx.as_str());
        prop_assert!(log.to(Vec::new()).ptr_eq(&log));
        prop_assert!(!log.to([logweave::sinks::nowhere()]).ptr_eq(&log));
    }

    /// A producer observes the level of the call evaluating it
    #[test]
    fn test_producer_sees_level(levels in prop::collection::vec(any_level(), 1..10)) {
        let (log, memory) = context_capture();
        let log = log.fork(Context::producer(|level| level.to_str()));

        for &level in &levels {
            log.at(level, ());
        }

        let seen: Vec<Value> = memory.rendered().into_iter().flatten().collect();
        let expected: Vec<Value> = levels.iter().map(|l| Value::from(l.to_str())).collect();
        prop_assert_eq!(seen, expected);
    }
}

// ============================================================================
// Renderer Tests
// ============================================================================

proptest! {
    /// The bracketed renderer brackets every context and keeps messages bare
    #[test]
    fn test_bracketed_layout(
        contexts in prop::collection::vec("[a-z0-9]{1,10}", 0..4),
        messages in prop::collection::vec("[a-z0-9]{1,10}", 0..4),
    ) {
        let ctx: Vec<Value> = contexts.iter().map(|s| Value::from(s.as_str())).collect();
        let msg: Vec<Value> = messages.iter().map(|s| Value::from(s.as_str())).collect();
        let line = renderers::bracketed().render(Level::Info, &ctx, &msg).unwrap();

        let expected: Vec<String> = contexts
            .iter()
            .map(|c| format!("[{}]", c))
            .chain(messages.iter().cloned())
            .collect();
        prop_assert_eq!(line, expected.join(" "));
    }

    /// JSON lines always parse back with the same level and message count
    #[test]
    fn test_json_parses(level in any_level(), messages in prop::collection::vec(any::<i32>(), 0..6)) {
        let msg: Vec<Value> = messages.iter().map(|&n| Value::from(n)).collect();
        let line = renderers::json().render(level, &[], &msg).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        prop_assert_eq!(parsed["level"].as_str(), Some(level.to_str()));
        prop_assert_eq!(parsed["messages"].as_array().map(Vec::len), Some(messages.len()));
    }
}

// ============================================================================
// TimestampFormat Tests
// ============================================================================

proptest! {
    /// Numeric formats produce digits only
    #[test]
    fn test_numeric_timestamps(secs in 0i64..4_000_000_000) {
        let time = chrono::DateTime::from_timestamp(secs, 0).unwrap();
        for format in [TimestampFormat::Unix, TimestampFormat::UnixMillis] {
            prop_assert!(format.is_numeric());
            prop_assert!(format.format(&time).chars().all(|c| c.is_ascii_digit()));
        }
    }
}
