//! Call-style syntax: `<class>.<command>(<args>)`.
//!
//! [`parse_call`] turns a call-style line into a structured [`CallStyle`];
//! [`normalize`] renders it back as the canonical
//! `<command> <class> [<id>] [<args>]` line, or returns the input unchanged
//! when the line is not valid call-style syntax.
//!
//! Accepted argument shapes:
//!
//! ```text
//! User.all()
//! User.show("1234")
//! User.update("1234", "first_name", "Ann")
//! User.update("1234", {"first_name": "Ann", "age": 3})
//! ```

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::error::NormalizeError;
use crate::mapping::parse_mapping;
use crate::tokenize::{quote_if_needed, unquote};

/// Commands that may be invoked with call-style syntax.
pub const CALL_VERBS: [&str; 5] = ["all", "count", "show", "destroy", "update"];

/// Arguments after the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgs {
    None,
    /// Comma-separated tokens, quotes stripped.
    Tokens(Vec<String>),
    /// A brace-delimited mapping literal, kept verbatim.
    Mapping(String),
}

/// A parsed call-style command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStyle {
    pub verb: String,
    pub class: String,
    pub id: Option<String>,
    pub args: CallArgs,
}

/// Renders the canonical `<command> <class> [<id>] [<args>]` form.
impl fmt::Display for CallStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.verb)?;
        if !self.class.is_empty() {
            write!(f, " {}", self.class)?;
        }
        if let Some(id) = &self.id {
            write!(f, " {}", quote_if_needed(id))?;
        }
        match &self.args {
            CallArgs::None => {}
            CallArgs::Tokens(tokens) => {
                for token in tokens {
                    write!(f, " {}", quote_if_needed(token))?;
                }
            }
            CallArgs::Mapping(text) => write!(f, " {text}")?,
        }
        Ok(())
    }
}

/// Rewrite a call-style line into canonical form.
///
/// Lines that are not call-style, or that fail to parse as call-style, are
/// returned unchanged so that command dispatch can report them.
pub fn normalize(line: &str) -> Cow<'_, str> {
    match parse_call(line) {
        Ok(call) => {
            let canonical = call.to_string();
            debug!(line, %canonical, "normalized call-style line");
            Cow::Owned(canonical)
        }
        Err(NormalizeError::NotCallStyle) => Cow::Borrowed(line),
        Err(err) => {
            debug!(line, error = %err, "call-style parse failed, using line as-is");
            Cow::Borrowed(line)
        }
    }
}

/// Parse a call-style line.
pub fn parse_call(line: &str) -> Result<CallStyle, NormalizeError> {
    let line = line.trim();
    let (Some(dot), Some(open), Some(close)) = (line.find('.'), line.find('('), line.rfind(')'))
    else {
        return Err(NormalizeError::NotCallStyle);
    };
    if open < dot || close < open {
        return Err(NormalizeError::MisplacedParen);
    }

    let class = &line[..dot];
    if class.chars().any(char::is_whitespace) {
        return Err(NormalizeError::MalformedClass(class.to_string()));
    }

    let verb = &line[dot + 1..open];
    if !CALL_VERBS.contains(&verb) {
        return Err(NormalizeError::UnknownVerb(verb.to_string()));
    }

    let trailing = &line[close + 1..];
    if !trailing.trim().is_empty() {
        return Err(NormalizeError::TrailingText(trailing.to_string()));
    }

    let (id, args) = parse_arguments(&line[open + 1..close])?;
    Ok(CallStyle {
        verb: verb.to_string(),
        class: class.to_string(),
        id,
        args,
    })
}

fn parse_arguments(inner: &str) -> Result<(Option<String>, CallArgs), NormalizeError> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok((None, CallArgs::None));
    }

    let (id_raw, rest) = match first_top_level_comma(inner) {
        Some(i) => (&inner[..i], inner[i + 1..].trim()),
        None => (inner, ""),
    };
    let id = unquote(id_raw.trim());

    let args = if rest.is_empty() {
        CallArgs::None
    } else if rest.starts_with('{') && rest.ends_with('}') {
        parse_mapping(rest)?;
        CallArgs::Mapping(rest.to_string())
    } else {
        let tokens = split_commas(rest)
            .into_iter()
            .map(|t| unquote(t.trim()))
            .filter(|t| !t.is_empty())
            .collect();
        CallArgs::Tokens(tokens)
    };

    let id = if id.is_empty() && args == CallArgs::None {
        None
    } else {
        Some(id)
    };
    Ok((id, args))
}

fn first_top_level_comma(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ',') => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some(i) = first_top_level_comma(rest) {
        parts.push(&rest[..i]);
        rest = &rest[i + 1..];
    }
    parts.push(rest);
    parts
}
