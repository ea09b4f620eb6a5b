//! Unicode Range - CSS `unicode-range` descriptor model
//!
//! Parses `unicode-range` descriptors into closed code point intervals,
//! answers coverage questions, and picks a short representative string
//! of code points for width based font load detection.
//!
//! # Modules
//!
//! - `interval`: A single closed interval and its canonical form
//! - `range`: Comma separated interval sets, intersection and test strings
//! - `encode`: UTF-16 encoding of code points

mod encode;
mod error;
mod interval;
mod range;

pub use encode::*;
pub use error::*;
pub use interval::*;
pub use range::*;

/// Highest Unicode scalar value accepted in a descriptor
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Test string used when no narrower range is known
///
/// The glyphs have widths that differ a lot between common fonts.
pub const DEFAULT_TEST_STRING: &str = "BESbswy";
