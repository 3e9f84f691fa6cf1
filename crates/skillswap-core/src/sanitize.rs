//! Cleanup for free text that other users will see (request notes, review
//! comments).

use crate::{Error, Result};

/// Upper bound on free-text fields, in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Trim, bound the length, drop control characters (keeping line breaks and
/// tabs) and HTML-escape the rest.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String> {
    let trimmed = input.trim();

    let len = trimmed.chars().count();
    if len > max_len {
        return Err(Error::InvalidInput(format!(
            "text is {} characters, limit is {}",
            len, max_len
        )));
    }

    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '\n' | '\r' | '\t' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    Ok(out)
}
