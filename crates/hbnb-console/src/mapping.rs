//! Parser for `{key: value, ...}` mapping literals passed to `update`.
//!
//! Keys and values may be bare or quoted with `"` or `'`. Commas and colons
//! inside quotes are literal. A trailing comma is accepted; nested braces or
//! brackets are not.

use crate::error::MappingError;
use crate::tokenize::unquote;

/// Parse a brace-delimited mapping literal into raw `(key, value)` pairs.
///
/// Values are returned as text; type coercion is the caller's job.
pub fn parse_mapping(text: &str) -> Result<Vec<(String, String)>, MappingError> {
    let text = text.trim();
    let inner = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or(MappingError::NotBraced)?;

    let entries = split_top_level(inner, ',')?;
    let last = entries.len().saturating_sub(1);
    let mut pairs = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let entry = entry.trim();
        if entry.is_empty() {
            // `{}` and a single trailing comma are fine.
            if i == last {
                continue;
            }
            return Err(MappingError::EmptyEntry);
        }

        let parts = split_top_level(entry, ':')?;
        if parts.len() < 2 {
            return Err(MappingError::MissingColon(entry.to_string()));
        }
        let key_raw = parts[0].trim();
        // Only the first colon separates; the value keeps the rest.
        let value_raw = entry[parts[0].len() + 1..].trim();

        let key = unquote(key_raw);
        if key.is_empty() {
            return Err(MappingError::EmptyKey);
        }
        if value_raw.is_empty() {
            return Err(MappingError::EmptyValue(key));
        }
        pairs.push((key, unquote(value_raw)));
    }
    Ok(pairs)
}

/// Split on `sep` outside quotes. Rejects nesting and unterminated quotes.
fn split_top_level(text: &str, sep: char) -> Result<Vec<&str>, MappingError> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '}' | '[' | ']' => return Err(MappingError::Nested),
            c if c == sep => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if quote.is_some() {
        return Err(MappingError::UnterminatedQuote);
    }
    parts.push(&text[start..]);
    Ok(parts)
}
