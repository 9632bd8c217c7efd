//! Bracketed text renderer

use crate::core::{Renderer, Value};
use std::fmt::Write;

/// Render each context as `[context]`, followed by the messages, all joined
/// by single spaces.
///
/// # Example
///
/// ```
/// use logweave::{renderers, Level, Value};
///
/// let render = renderers::bracketed();
/// let line = render
///     .render(Level::Info, &[Value::from("db")], &[Value::from("connected"), Value::from(3)])
///     .unwrap();
/// assert_eq!(line, "[db] connected 3");
/// ```
pub fn bracketed() -> Renderer<String> {
    Renderer::new(|_, contexts, messages| render_line(contexts, messages))
}

fn render_line(contexts: &[Value], messages: &[Value]) -> String {
    let mut line = String::new();
    for context in contexts {
        if !line.is_empty() {
            line.push(' ');
        }
        // Writing into a String cannot fail
        let _ = write!(line, "[{}]", context);
    }
    for message in messages {
        if !line.is_empty() {
            line.push(' ');
        }
        let _ = write!(line, "{}", message);
    }
    line
}
