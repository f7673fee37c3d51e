//! Option-value escaping.
//!
//! The client splits `-o` values on `,` and treats `\` as its escape
//! character, so both must be prefixed with `\` to survive as one token.

use crate::error::LaunchError;

/// Capacity of an escaped option value, terminator slot included.
pub const OPTION_CAPACITY: usize = 1024;

fn needs_escape(c: char) -> bool {
    c == ',' || c == '\\'
}

/// Escape `,` and `\` in `raw`.
pub fn escape(raw: &str) -> String {
    let extra = raw.chars().filter(|&c| needs_escape(c)).count();
    let mut out = String::with_capacity(raw.len() + extra);
    for c in raw.chars() {
        if needs_escape(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape `raw` into a buffer of `capacity` bytes (one reserved for the
/// terminator), failing instead of truncating when it does not fit.
pub fn escape_bounded(raw: &str, capacity: usize) -> Result<String, LaunchError> {
    let escaped = escape(raw);
    let needed = escaped.len() + 1;
    if needed > capacity {
        return Err(LaunchError::BufferTooSmall { capacity, needed });
    }
    Ok(escaped)
}

/// Inverse of [`escape`]: drop one `\` before each escaped character.
///
/// A trailing lone `\` is kept as-is.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}
