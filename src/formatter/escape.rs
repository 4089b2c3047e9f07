//! JSON string escaping

use std::borrow::Cow;

/// Escape a string for embedding in a JSON string literal
///
/// Covers the full JSON string grammar: quote, backslash, and all control
/// characters. Returns the input unchanged when nothing needs escaping.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => {
                escaped.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '"' | '\\') || ch.is_control()
}
