//! `font` shorthand parsing
//!
//! The value is scanned left to right by a four state machine:
//!
//! ```text
//! Variation --size--> BeforeFontFamily <--','-- FontFamily
//!     |                  ^      |                  ^
//!    '/'                 |      +---quoted name----+
//!     v                  |
//! LineHeight --space-----+
//! ```
//!
//! Whitespace may surround the `/`: a `/` that opens the family list
//! still moves to `LineHeight`, and `LineHeight` skips leading whitespace.
//!
//! Every transition consumes the [`Accumulator`] and hands a new one to the
//! next state, so each state can be driven in isolation.

use crate::identifier::{parse_identifier_sequence, unescape};
use crate::keywords::{classify, is_line_height, TokenClass};
use crate::{CssValueError, FontDeclarations, Result, INITIAL_VALUE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Style, variant, weight and stretch tokens, terminated by the size
    Variation,
    /// After `size/`
    LineHeight,
    /// Expecting the next family name
    BeforeFontFamily,
    /// After a quoted family name, expecting a comma
    FontFamily,
}

/// Values collected so far plus the pending token buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    pub style: Option<String>,
    pub variant: Option<String>,
    pub weight: Option<String>,
    pub stretch: Option<String>,
    pub size: Option<String>,
    pub line_height: Option<String>,
    pub family: Vec<String>,
    pub buffer: String,
}

impl Accumulator {
    fn push(mut self, c: char) -> Self {
        self.buffer.push(c);
        self
    }

    fn take_buffer(mut self) -> (Self, String) {
        let buffer = std::mem::take(&mut self.buffer);
        (self, buffer)
    }

    fn push_identifier(mut self) -> Result<Self> {
        let buffer = std::mem::take(&mut self.buffer);
        if let Some(name) = parse_identifier_sequence(&buffer)? {
            self.family.push(name);
        }
        Ok(self)
    }
}

/// Result of feeding one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ParseState,
    pub acc: Accumulator,
    /// Byte offset of the next character to read
    pub next: usize,
}

/// Feed the character at byte offset `pos` of `input` to `state`
pub fn step(
    state: ParseState,
    acc: Accumulator,
    input: &str,
    pos: usize,
    c: char,
) -> Result<Transition> {
    let next = pos + c.len_utf8();
    let advance = |state: ParseState, acc: Accumulator| -> Result<Transition> {
        Ok(Transition { state, acc, next })
    };

    match state {
        ParseState::Variation if c.is_whitespace() || c == '/' => {
            let (mut acc, token) = acc.take_buffer();
            match classify(&token) {
                TokenClass::Size => {
                    acc.size = Some(token);
                    let next_state = if c == '/' {
                        ParseState::LineHeight
                    } else {
                        ParseState::BeforeFontFamily
                    };
                    return advance(next_state, acc);
                }
                TokenClass::Style => acc.style = Some(token),
                TokenClass::Variant => acc.variant = Some(token),
                TokenClass::Weight => acc.weight = Some(token),
                TokenClass::Stretch => acc.stretch = Some(token),
                TokenClass::Normal | TokenClass::Unknown => {}
            }
            advance(ParseState::Variation, acc)
        }
        ParseState::LineHeight if c.is_whitespace() && acc.buffer.is_empty() => {
            advance(ParseState::LineHeight, acc)
        }
        ParseState::LineHeight if c.is_whitespace() => {
            let (mut acc, token) = acc.take_buffer();
            if !is_line_height(&token) {
                return Err(CssValueError::InvalidLineHeight(token));
            }
            acc.line_height = Some(token);
            advance(ParseState::BeforeFontFamily, acc)
        }
        ParseState::BeforeFontFamily
            if c == '/'
                && acc.size.is_some()
                && acc.line_height.is_none()
                && acc.family.is_empty()
                && acc.buffer.trim().is_empty() =>
        {
            let (acc, _) = acc.take_buffer();
            advance(ParseState::LineHeight, acc)
        }
        ParseState::BeforeFontFamily if c == '"' || c == '\'' => {
            if !acc.buffer.trim().is_empty() {
                let stray = format!("{}{}", acc.buffer.trim(), c);
                return Err(CssValueError::InvalidIdentifier(stray));
            }
            let (content, after) = scan_quoted(input, pos, c)?;
            let (mut acc, _) = acc.take_buffer();
            acc.family.push(unescape(content));
            Ok(Transition {
                state: ParseState::FontFamily,
                acc,
                next: after,
            })
        }
        ParseState::BeforeFontFamily if c == ',' => {
            advance(ParseState::BeforeFontFamily, acc.push_identifier()?)
        }
        ParseState::FontFamily if c == ',' => {
            let (acc, trailing) = acc.take_buffer();
            if !trailing.trim().is_empty() {
                return Err(CssValueError::TrailingContent(trailing.trim().to_string()));
            }
            advance(ParseState::BeforeFontFamily, acc)
        }
        _ => advance(state, acc.push(c)),
    }
}

/// Find the closing quote for the quote at byte offset `open`
///
/// Returns the raw content between the quotes and the offset just past the
/// closing quote. A backslash always escapes the following character.
fn scan_quoted(input: &str, open: usize, quote: char) -> Result<(&str, usize)> {
    let start = open + quote.len_utf8();
    let mut escaped = false;

    for (offset, c) in input[start..].char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            let end = start + offset;
            return Ok((&input[start..end], end + quote.len_utf8()));
        }
    }

    Err(CssValueError::UnterminatedString)
}

/// Run the state machine over `input` starting in `state`
pub fn run(state: ParseState, input: &str) -> Result<(ParseState, Accumulator)> {
    let mut state = state;
    let mut acc = Accumulator::default();
    let mut pos = 0;

    while let Some(c) = input[pos..].chars().next() {
        let transition = step(state, acc, input, pos, c)?;
        state = transition.state;
        acc = transition.acc;
        pos = transition.next;
    }

    Ok((state, acc))
}

/// Flush the pending buffer once the input is exhausted
fn finish_families(state: ParseState, acc: Accumulator) -> Result<Accumulator> {
    match state {
        ParseState::Variation => Err(CssValueError::MissingSize),
        ParseState::LineHeight => Err(CssValueError::MissingFamily),
        ParseState::BeforeFontFamily => acc.push_identifier(),
        ParseState::FontFamily => {
            let (acc, trailing) = acc.take_buffer();
            if trailing.trim().is_empty() {
                Ok(acc)
            } else {
                Err(CssValueError::TrailingContent(trailing.trim().to_string()))
            }
        }
    }
}

/// A parsed `font` shorthand
///
/// Only sub-properties that were written are present; omitted ones take
/// their initial value at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretch: Option<String>,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    pub family: Vec<String>,
}

impl FontValue {
    /// Style, or `normal` when omitted
    pub fn style_or_initial(&self) -> &str {
        self.style.as_deref().unwrap_or(INITIAL_VALUE)
    }

    /// Variant, or `normal` when omitted
    pub fn variant_or_initial(&self) -> &str {
        self.variant.as_deref().unwrap_or(INITIAL_VALUE)
    }

    /// Weight, or `normal` when omitted
    pub fn weight_or_initial(&self) -> &str {
        self.weight.as_deref().unwrap_or(INITIAL_VALUE)
    }

    /// Stretch, or `normal` when omitted
    pub fn stretch_or_initial(&self) -> &str {
        self.stretch.as_deref().unwrap_or(INITIAL_VALUE)
    }

    /// Convert to typed declarations for measurement and serialization
    pub fn declarations(&self) -> FontDeclarations {
        FontDeclarations {
            style: self.style.clone(),
            variant: self.variant.clone(),
            weight: self.weight.clone(),
            stretch: self.stretch.clone(),
            size: Some(self.size.clone()),
            line_height: self.line_height.clone(),
            family: self.family.clone(),
        }
    }
}

impl FromStr for FontValue {
    type Err = CssValueError;

    fn from_str(input: &str) -> Result<Self> {
        let (state, acc) = run(ParseState::Variation, input.trim())?;
        let acc = finish_families(state, acc)?;

        let size = acc.size.ok_or(CssValueError::MissingSize)?;
        if acc.family.is_empty() {
            return Err(CssValueError::MissingFamily);
        }

        Ok(FontValue {
            style: acc.style,
            variant: acc.variant,
            weight: acc.weight,
            stretch: acc.stretch,
            size,
            line_height: acc.line_height,
            family: acc.family,
        })
    }
}

/// Parse a `font` shorthand, returning `None` if it is not valid
pub fn parse_font(input: &str) -> Option<FontValue> {
    input.parse().ok()
}

/// Parse a bare `font-family` list
pub fn parse_family_list(input: &str) -> Result<Vec<String>> {
    let (state, acc) = run(ParseState::BeforeFontFamily, input)?;
    let acc = finish_families(state, acc)?;
    if acc.family.is_empty() {
        return Err(CssValueError::MissingFamily);
    }
    Ok(acc.family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn families(input: &str) -> Vec<String> {
        parse_font(input).unwrap().family
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!("".parse::<FontValue>(), Err(CssValueError::MissingSize));
        assert_eq!("Arial".parse::<FontValue>(), Err(CssValueError::MissingSize));
        assert_eq!("12px".parse::<FontValue>(), Err(CssValueError::MissingSize));
        assert_eq!("12px/16px".parse::<FontValue>(), Err(CssValueError::MissingFamily));
        assert_eq!("bold 12px/16px".parse::<FontValue>(), Err(CssValueError::MissingFamily));
        assert_eq!("12px ,".parse::<FontValue>(), Err(CssValueError::MissingFamily));
        assert_eq!("-5px serif".parse::<FontValue>(), Err(CssValueError::MissingSize));
        assert_eq!("12px /".parse::<FontValue>(), Err(CssValueError::MissingFamily));
    }

    #[test]
    fn test_unterminated_strings() {
        for input in ["12px \"Comic", "12px \"Comic, serif", "12px 'Comic", "12px 'Comic, serif"] {
            assert_eq!(input.parse::<FontValue>(), Err(CssValueError::UnterminatedString), "{}", input);
            assert!(parse_font(input).is_none());
        }
    }

    #[test]
    fn test_simple_value() {
        let value = parse_font("12px serif").unwrap();
        assert_eq!(value.size, "12px");
        assert_eq!(value.family, vec!["serif"]);
        assert_eq!(value.style, None);
        assert_eq!(value.weight, None);
        assert_eq!(value.line_height, None);
    }

    #[test]
    fn test_multiple_families() {
        assert_eq!(families("12px Arial, Verdana, serif"), vec!["Arial", "Verdana", "serif"]);
        assert_eq!(families("12px Arial,Verdana"), vec!["Arial", "Verdana"]);
    }

    #[test]
    fn test_quoted_families() {
        assert_eq!(families("12px \"Times New Roman\""), vec!["Times New Roman"]);
        assert_eq!(families("12px 'Times New Roman'"), vec!["Times New Roman"]);
        assert_eq!(families(r#"12px "Times\" New Roman""#), vec!["Times\" New Roman"]);
        assert_eq!(families(r#"12px 'Times\' New Roman'"#), vec!["Times' New Roman"]);
        assert_eq!(families(r#"12px 'Times" New Roman'"#), vec!["Times\" New Roman"]);
        assert_eq!(
            families("12px 'Comic Sans', \"Helvetica Neue\" , serif"),
            vec!["Comic Sans", "Helvetica Neue", "serif"]
        );
    }

    #[test]
    fn test_unquoted_identifiers() {
        assert_eq!(families("12px Times New Roman"), vec!["Times New Roman"]);
        assert_eq!(
            families("12px Times New Roman, Comic Sans MS"),
            vec!["Times New Roman", "Comic Sans MS"]
        );
        assert_eq!(families("12px Lucida    Grande"), vec!["Lucida Grande"]);
    }

    #[test]
    fn test_escaped_identifiers() {
        assert_eq!(families(r"12px Red\/Black"), vec!["Red/Black"]);
        assert_eq!(families(r"12px Ahem\!"), vec!["Ahem!"]);
        assert_eq!(families(r"12px \$42"), vec!["$42"]);
        assert_eq!(families("12px €42"), vec!["€42"]);
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(parse_font("12px Red/Black").is_none());
        assert!(parse_font("12px Ahem!").is_none());
        assert!(parse_font("12px Hawaii 5-0").is_none());
        assert!(parse_font("12px $42").is_none());
    }

    #[test]
    fn test_content_after_quoted_family() {
        assert_eq!(
            "12px 'Lucida' Grande".parse::<FontValue>(),
            Err(CssValueError::TrailingContent("Grande".to_string()))
        );
        assert_eq!(
            "12px 'Lucida' Grande, serif".parse::<FontValue>(),
            Err(CssValueError::TrailingContent("Grande".to_string()))
        );
        assert!(parse_font("12px 'Lucida'   ").is_some());
    }

    #[test]
    fn test_variation_tokens() {
        assert_eq!(parse_font("italic 12px serif").unwrap().style.as_deref(), Some("italic"));
        assert_eq!(parse_font("oblique 12px serif").unwrap().style.as_deref(), Some("oblique"));
        assert_eq!(parse_font("small-caps 12px serif").unwrap().variant.as_deref(), Some("small-caps"));
        assert_eq!(parse_font("bold 12px serif").unwrap().weight.as_deref(), Some("bold"));
        assert_eq!(parse_font("lighter 12px serif").unwrap().weight.as_deref(), Some("lighter"));
        assert_eq!(
            parse_font("ultra-condensed 12px serif").unwrap().stretch.as_deref(),
            Some("ultra-condensed")
        );
        for weight in (1..10).map(|i| (i * 100).to_string()) {
            let value = parse_font(&format!("{} 12px serif", weight)).unwrap();
            assert_eq!(value.weight, Some(weight));
        }
    }

    #[test]
    fn test_variation_order_and_unknown_tokens() {
        let value = parse_font("condensed bold small-caps italic 12px serif").unwrap();
        assert_eq!(value.style.as_deref(), Some("italic"));
        assert_eq!(value.variant.as_deref(), Some("small-caps"));
        assert_eq!(value.weight.as_deref(), Some("bold"));
        assert_eq!(value.stretch.as_deref(), Some("condensed"));

        let value = parse_font("normal wibble  12px serif").unwrap();
        assert_eq!(value.style, None);
        assert_eq!(value.weight, None);
        assert_eq!(value.weight_or_initial(), "normal");
    }

    #[test]
    fn test_line_height() {
        assert_eq!(parse_font("12px/16px serif").unwrap().line_height.as_deref(), Some("16px"));
        assert_eq!(parse_font("bold 12px/1.5 Arial").unwrap().line_height.as_deref(), Some("1.5"));
        assert_eq!(
            "12px/tall serif".parse::<FontValue>(),
            Err(CssValueError::InvalidLineHeight("tall".to_string()))
        );
    }

    #[test]
    fn test_line_height_with_spaced_slash() {
        for input in ["12px / 16px serif", "12px/ 16px serif", "12px /16px serif", "12px  /  16px serif"] {
            let value = parse_font(input).unwrap();
            assert_eq!(value.size, "12px", "{}", input);
            assert_eq!(value.line_height.as_deref(), Some("16px"), "{}", input);
            assert_eq!(value.family, vec!["serif"], "{}", input);
        }
        let value = parse_font("bold 12px / 1.5 'Open Sans', serif").unwrap();
        assert_eq!(value.line_height.as_deref(), Some("1.5"));
        assert_eq!(value.family, vec!["Open Sans", "serif"]);

        assert!(parse_font("12px/16px / serif").is_none());
        assert!(parse_family_list("/ serif").is_err());
    }

    #[test]
    fn test_step_from_each_state() {
        let acc = Accumulator {
            buffer: "12px".to_string(),
            ..Default::default()
        };
        let t = step(ParseState::Variation, acc, "12px/16px serif", 4, '/').unwrap();
        assert_eq!(t.state, ParseState::LineHeight);
        assert_eq!(t.acc.size.as_deref(), Some("12px"));
        assert_eq!(t.next, 5);

        let acc = Accumulator {
            size: Some("12px".to_string()),
            ..Default::default()
        };
        let t = step(ParseState::BeforeFontFamily, acc, "12px / 16px serif", 5, '/').unwrap();
        assert_eq!(t.state, ParseState::LineHeight);
        let t = step(t.state, t.acc, "12px / 16px serif", 6, ' ').unwrap();
        assert_eq!(t.state, ParseState::LineHeight);
        assert!(t.acc.buffer.is_empty());

        let t = step(ParseState::BeforeFontFamily, Accumulator::default(), "'A b', c", 0, '\'').unwrap();
        assert_eq!(t.state, ParseState::FontFamily);
        assert_eq!(t.acc.family, vec!["A b"]);
        assert_eq!(t.next, 5);

        let acc = Accumulator {
            buffer: " x".to_string(),
            ..Default::default()
        };
        assert!(step(ParseState::FontFamily, acc, ",", 0, ',').is_err());
    }

    #[test]
    fn test_parse_family_list() {
        assert_eq!(
            parse_family_list("Arial, 'Times New Roman', serif").unwrap(),
            vec!["Arial", "Times New Roman", "serif"]
        );
        assert_eq!(parse_family_list(r"Red\/Black").unwrap(), vec!["Red/Black"]);
        assert_eq!(parse_family_list("a,,b").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_family_list(""), Err(CssValueError::MissingFamily));
        assert_eq!(parse_family_list("'open"), Err(CssValueError::UnterminatedString));
    }

    #[test]
    fn test_declarations_and_json() {
        let value = parse_font("italic bold 12px/16px 'My Font', serif").unwrap();
        let declarations = value.declarations();
        assert_eq!(declarations.size.as_deref(), Some("12px"));
        assert_eq!(declarations.family, vec!["My Font", "serif"]);

        let json = serde_json::to_string(&value).unwrap();
        assert!(!json.contains("variant"));
        let back: FontValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    proptest! {
        #[test]
        fn prop_quoted_family_parses_back(name in "[ -~]{1,24}") {
            let quoted = crate::quote_family(&name);
            prop_assert_eq!(parse_family_list(&quoted), Ok(vec![name.clone()]));
        }

        #[test]
        fn prop_parse_font_never_panics(input in "\\PC{0,40}") {
            let _ = parse_font(&input);
        }
    }
}
