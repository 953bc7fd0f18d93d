//! Argument tokenizer for canonical command lines.
//!
//! Arguments are separated by whitespace with two exceptions:
//! - a `"..."` or `'...'` segment is one token, quotes removed
//!   (`\"`, `\'` and `\\` are unescaped inside it);
//! - a `{...}` segment is one token kept verbatim, braces included, so the
//!   `update` handler can read it as a mapping literal.
//!
//! Unterminated quotes or braces run to the end of the line.

use std::iter::Peekable;
use std::str::Chars;

/// Split canonical argument text into tokens.
pub fn split_args(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let token = match c {
            '"' | '\'' => {
                chars.next();
                read_quoted(&mut chars, c)
            }
            '{' => read_braced(&mut chars),
            _ => read_bare(&mut chars),
        };
        tokens.push(token);
    }
    tokens
}

/// Split off the first whitespace-delimited word. Returns `(word, rest)`.
pub fn split_verb(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(i) => (&line[..i], &line[i..]),
        None => (line, ""),
    }
}

/// Remove one pair of matching surrounding quotes, unescaping the inside.
/// Text without matching quotes is returned unchanged.
pub fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), text.chars().last()) {
        (Some(open), Some(close)) if text.len() >= 2 && open == close && (open == '"' || open == '\'') => {
            let mut inner = text[1..text.len() - 1].chars().peekable();
            let mut out = String::new();
            while let Some(c) = inner.next() {
                if c == '\\' {
                    if let Some(&next) = inner.peek() {
                        if next == open || next == '\\' {
                            out.push(next);
                            inner.next();
                            continue;
                        }
                    }
                }
                out.push(c);
            }
            out
        }
        _ => text.to_string(),
    }
}

/// Quote a token if the tokenizer would otherwise split or alter it.
pub fn quote_if_needed(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token.chars().any(char::is_whitespace)
        || token.starts_with(['"', '\'', '{']);
    if !needs_quotes {
        return token.to_string();
    }
    let mut out = String::with_capacity(token.len() + 2);
    out.push('"');
    for c in token.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> String {
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next) if next == quote || next == '\\' => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            },
            c if c == quote => break,
            c => out.push(c),
        }
    }
    out
}

fn read_braced(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in chars.by_ref() {
        out.push(c);
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            },
        }
    }
    out
}

fn read_bare(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whitespace_split() {
        assert_eq!(split_args("User  1234 \t name"), vec!["User", "1234", "name"]);
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn quoted_tokens() {
        assert_eq!(
            split_args(r#"User 1 name "Bob Smith""#),
            vec!["User", "1", "name", "Bob Smith"]
        );
        assert_eq!(split_args("a 'single quoted'"), vec!["a", "single quoted"]);
        assert_eq!(split_args(r#""""#), vec![""]);
    }

    #[test]
    fn escaped_quotes() {
        assert_eq!(split_args(r#""say \"hi\"""#), vec![r#"say "hi""#]);
        assert_eq!(split_args(r#""back\\slash""#), vec![r"back\slash"]);
    }

    #[test]
    fn braced_token_is_verbatim() {
        assert_eq!(
            split_args(r#"Place 1 {"name": "Loft", 'max_guest': 4} trailing"#),
            vec!["Place", "1", r#"{"name": "Loft", 'max_guest': 4}"#, "trailing"]
        );
    }

    #[test]
    fn braces_inside_quotes_do_not_close() {
        assert_eq!(split_args(r#"{"a": "}"}"#), vec![r#"{"a": "}"}"#]);
    }

    #[test]
    fn unterminated_runs_to_end() {
        assert_eq!(split_args(r#"x "open quote"#), vec!["x", "open quote"]);
        assert_eq!(split_args("x {a: 1"), vec!["x", "{a: 1"]);
    }

    #[test]
    fn verb_split() {
        assert_eq!(split_verb("  show User 1"), ("show", " User 1"));
        assert_eq!(split_verb("quit"), ("quit", ""));
        assert_eq!(split_verb(""), ("", ""));
    }

    #[test]
    fn unquote_cases() {
        assert_eq!(unquote(r#""abc""#), "abc");
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote(r#""abc'"#), r#""abc'"#);
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote(r#""a\"b""#), r#"a"b"#);
    }

    #[test]
    fn quote_if_needed_cases() {
        assert_eq!(quote_if_needed("plain"), "plain");
        assert_eq!(quote_if_needed("two words"), r#""two words""#);
        assert_eq!(quote_if_needed(""), r#""""#);
        assert_eq!(quote_if_needed(r#""lead"#), r#""\"lead""#);
    }

    proptest! {
        #[test]
        fn quoted_token_survives_tokenizer(token in "\\PC*") {
            let line = quote_if_needed(&token);
            prop_assert_eq!(split_args(&line), vec![token]);
        }

        #[test]
        fn bare_words_split_on_whitespace(words in prop::collection::vec("[A-Za-z0-9_.-]{1,8}", 0..6)) {
            prop_assert_eq!(split_args(&words.join(" ")), words);
        }
    }
}
