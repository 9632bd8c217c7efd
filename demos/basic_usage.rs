//! Basic logger usage example
//!
//! Demonstrates forking contexts, level floors and fanning out to several
//! sinks from one logger value.
//!
//! Run with: cargo run --example basic_usage

use logweave::prelude::*;
use logweave::renderers;
use logweave::sinks::{ConsoleSink, MemorySink};

fn main() -> Result<()> {
    println!("=== logweave - Basic Usage Example ===\n");

    // The bundled default: timestamp and level contexts, console output
    let log = logweave::console();

    println!("1. Logging at different levels:");
    log.trace("This is a trace message");
    log.debug("This is a debug message");
    log.verbose("This is a verbose message");
    log.info("This is an info message");
    log.log("This is a log message");
    log.warn("This is a warning message");
    log.error("This is an error message");
    log.fatal("This is a fatal message");

    println!("\n2. Forked loggers carry their own contexts:");
    let db = log.fork("db");
    let replica = db.fork(Fields::new().with_field("replica", 2));
    db.info(("connected to", "primary"));
    replica.warn(("lag", 1.5, "seconds"));
    log.info("the parent logger is unchanged");

    println!("\n3. Conditions gate calls:");
    let quiet = log.r#if(Level::Warn);
    quiet.info("Info message (hidden)");
    quiet.warn("Warning message (visible)");

    println!("\n4. One call, several sinks:");
    let memory = MemorySink::new();
    let plain = logweave::with_renderer(renderers::bracketed())
        .to([ConsoleSink::with_colors(false).sink(), memory.sink()])
        .fork(renderers::level());
    plain.info("rendered once").warn("and chained").wait()?;
    println!("   captured {} lines in memory", memory.len());

    println!("\n5. Configuration from the environment:");
    let configured = Config::from_env()?.build();
    configured.info("configured from LOGWEAVE_* variables");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
