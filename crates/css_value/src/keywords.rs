//! Keyword classification for the `font` shorthand
//!
//! Tokens before the font size may appear in any order, so each one is
//! tested against every sub-property in turn and the first match wins.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Sub-property a token before the family list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Absolute/relative size keyword or a length; ends the variation tokens
    Size,
    Style,
    Variant,
    Weight,
    Stretch,
    /// `normal`, valid for all four variation sub-properties
    Normal,
    /// Anything else, silently ignored
    Unknown,
}

struct Classifiers {
    size: Regex,
    style: Regex,
    variant: Regex,
    weight: Regex,
    stretch: Regex,
    line_height: Regex,
}

const LENGTH: &str = r"\+?(?:\d*\.)?\d+(?:e[+-]?\d+)?";
const UNITS: &str = r"(?:px|em|ex|ch|rem|vh|vw|vmin|vmax|cm|mm|q|in|pt|pc|%)";

fn classifiers() -> &'static Classifiers {
    static CLASSIFIERS: OnceLock<Classifiers> = OnceLock::new();
    CLASSIFIERS.get_or_init(|| {
        let compile = |pattern: String| {
            Regex::new(&format!("(?i)^(?:{})$", pattern)).expect("font keyword pattern is valid")
        };
        Classifiers {
            size: compile(format!(
                "xx-small|x-small|small|medium|large|x-large|xx-large|xxx-large|larger|smaller|{}{}",
                LENGTH, UNITS
            )),
            style: compile("italic|oblique".to_string()),
            variant: compile("small-caps".to_string()),
            weight: compile("bold|bolder|lighter|[1-9]00".to_string()),
            stretch: compile("(?:(?:ultra|extra|semi)-)?(?:condensed|expanded)".to_string()),
            line_height: compile(format!("normal|{}{}?", LENGTH, UNITS)),
        }
    })
}

/// Classify a whitespace delimited token that precedes the family list
pub fn classify(token: &str) -> TokenClass {
    let classifiers = classifiers();

    if classifiers.size.is_match(token) {
        TokenClass::Size
    } else if classifiers.style.is_match(token) {
        TokenClass::Style
    } else if classifiers.variant.is_match(token) {
        TokenClass::Variant
    } else if classifiers.weight.is_match(token) {
        TokenClass::Weight
    } else if classifiers.stretch.is_match(token) {
        TokenClass::Stretch
    } else if token.eq_ignore_ascii_case("normal") {
        TokenClass::Normal
    } else {
        TokenClass::Unknown
    }
}

/// Check whether a token is a valid `line-height` value
pub fn is_line_height(token: &str) -> bool {
    classifiers().line_height.is_match(token)
}

/// Map a weight to its numeric value
///
/// `normal` and `bold` map to 400 and 700. Relative keywords (`bolder`,
/// `lighter`) depend on the inherited weight and yield `None`, as does
/// anything that is not a weight.
pub fn normalize_weight(weight: &str) -> Option<u16> {
    let weight = weight.trim();
    if weight.eq_ignore_ascii_case("normal") {
        return Some(400);
    }
    if weight.eq_ignore_ascii_case("bold") {
        return Some(700);
    }
    match weight.parse::<u16>() {
        Ok(value) if (100..=900).contains(&value) && value % 100 == 0 => Some(value),
        _ => None,
    }
}
