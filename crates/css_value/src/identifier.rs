//! CSS identifiers and escapes
//!
//! Unquoted family names are sequences of CSS identifiers separated by
//! whitespace. A backslash escapes the next character, or starts a hex
//! escape of one to six digits optionally terminated by one whitespace.

use crate::{CssValueError, Result};
use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

enum Escape {
    Char(char),
    /// Backslash followed by a newline
    Newline,
    /// Backslash at end of input
    Eof,
}

/// Consume an escape sequence; the backslash has already been read
fn consume_escape(chars: &mut Peekable<Chars<'_>>) -> Escape {
    let first = match chars.peek() {
        Some(&c) => c,
        None => return Escape::Eof,
    };

    if first == '\n' || first == '\r' || first == '\u{c}' {
        chars.next();
        if first == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        return Escape::Newline;
    }

    if !first.is_ascii_hexdigit() {
        chars.next();
        return Escape::Char(first);
    }

    let mut value: u32 = 0;
    let mut digits = 0;
    while digits < 6 {
        match chars.peek().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                value = value * 16 + digit;
                digits += 1;
                chars.next();
            }
            None => break,
        }
    }

    // One whitespace terminates the escape and belongs to it
    match chars.peek() {
        Some('\r') => {
            chars.next();
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
        }
        Some(&c) if c == ' ' || c == '\t' || c == '\n' || c == '\u{c}' => {
            chars.next();
        }
        _ => {}
    }

    let resolved = match value {
        0 => '\u{fffd}',
        _ => char::from_u32(value).unwrap_or('\u{fffd}'),
    };
    Escape::Char(resolved)
}

/// Resolve all backslash escapes in quoted string content
///
/// Escaped newlines are line continuations and vanish, as does a trailing
/// lone backslash.
pub fn unescape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match consume_escape(&mut chars) {
            Escape::Char(resolved) => result.push(resolved),
            Escape::Newline | Escape::Eof => {}
        }
    }

    result
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c >= '\u{a0}'
}

/// An identifier may not look like a number or a custom property
fn starts_like_number(first: char, second: Option<char>) -> bool {
    first.is_ascii_digit()
        || (first == '-' && matches!(second, Some(c) if c.is_ascii_digit() || c == '-'))
}

/// Parse an unquoted family name
///
/// Words are validated and unescaped, then joined with single spaces.
/// Returns `Ok(None)` when the input is blank.
pub fn parse_identifier_sequence(input: &str) -> Result<Option<String>> {
    let invalid = || CssValueError::InvalidIdentifier(input.trim().to_string());

    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if in_word {
                words.push(std::mem::take(&mut word));
                in_word = false;
            }
            continue;
        }

        if !in_word {
            if starts_like_number(c, chars.peek().copied()) {
                return Err(invalid());
            }
            in_word = true;
        }

        if c == '\\' {
            match consume_escape(&mut chars) {
                Escape::Char(resolved) => word.push(resolved),
                Escape::Newline | Escape::Eof => return Err(invalid()),
            }
        } else if is_name_char(c) {
            word.push(c);
        } else {
            return Err(invalid());
        }
    }

    if in_word {
        words.push(word);
    }

    if words.is_empty() {
        Ok(None)
    } else {
        Ok(Some(words.join(" ")))
    }
}

/// Serialize a family name, quoting it unless it is a plain identifier sequence
pub fn quote_family(name: &str) -> Cow<'_, str> {
    let plain = !name.is_empty()
        && name.split(' ').all(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    !starts_like_number(first, chars.clone().next())
                        && word.chars().all(is_name_char)
                }
                None => false,
            }
        });

    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(quote_string(name))
    }
}

/// Serialize text as a double quoted CSS string
pub fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
