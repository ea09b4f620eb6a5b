//! CSS Value - Parsing of the CSS values needed for font loading
//!
//! This crate parses `font` shorthand values and bare `font-family`
//! lists, models font declarations as a closed record that serializes
//! back to CSS text, and extracts sources from `@font-face` `src`
//! descriptors.
//!
//! # Modules
//!
//! - `font`: The `font` shorthand state machine and `font-family` lists
//! - `keywords`: Keyword and length classification, weight normalization
//! - `identifier`: CSS identifiers, escapes and family name quoting
//! - `declarations`: Typed font declarations and their serializer
//! - `src`: `url()`/`format()` extraction from `src` descriptors

mod declarations;
mod error;
pub mod font;
mod identifier;
pub mod keywords;
mod src;

pub use declarations::*;
pub use error::*;
pub use font::{parse_family_list, parse_font, FontValue};
pub use identifier::{parse_identifier_sequence, quote_family, quote_string, unescape};
pub use keywords::normalize_weight;
pub use src::*;

/// Initial value of every font sub-property that the shorthand may omit
pub const INITIAL_VALUE: &str = "normal";
