//! Unicode range sets
//!
//! A [`UnicodeRange`] is the parsed form of a `unicode-range` descriptor:
//! an ordered list of closed intervals, exactly as written.

use crate::{encode_code_points, Interval, RangeError, Result, DEFAULT_TEST_STRING};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Maximum number of code points in a generated test string
const TEST_STRING_LENGTH: usize = 7;

/// Ordered set of code point intervals
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnicodeRange {
    intervals: Vec<Interval>,
}

impl UnicodeRange {
    /// Parse a comma separated `unicode-range` descriptor
    ///
    /// Fails on the first token that is not a valid interval; no partial
    /// set is ever returned.
    pub fn parse(descriptor: &str) -> Result<Self> {
        if descriptor.trim().is_empty() {
            return Err(RangeError::Empty);
        }

        let intervals = descriptor
            .split(',')
            .map(str::parse::<Interval>)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { intervals })
    }

    /// The range covering every code point, `u+0-10ffff`
    pub fn full() -> Self {
        Self {
            intervals: vec![Interval::full()],
        }
    }

    /// Build a range from the distinct characters of a text, in ascending order
    pub fn from_text(text: &str) -> Self {
        let code_points: BTreeSet<u32> = text.chars().map(u32::from).collect();
        let intervals = code_points
            .into_iter()
            .filter_map(|code_point| Interval::single(code_point).ok())
            .collect();

        Self { intervals }
    }

    /// The intervals in descriptor order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Check whether this is exactly the full code point range
    pub fn is_full(&self) -> bool {
        self.intervals.len() == 1 && self.intervals[0] == Interval::full()
    }

    /// Check whether any interval contains the code point
    pub fn contains(&self, code_point: u32) -> bool {
        self.intervals.iter().any(|interval| interval.contains(code_point))
    }

    /// Check whether any interval of `self` intersects any interval of `other`
    pub fn intersects(&self, other: &UnicodeRange) -> bool {
        self.intervals
            .iter()
            .any(|a| other.intervals.iter().any(|b| a.intersects(b)))
    }

    /// Code points usable for rendering tests, in descriptor order
    ///
    /// Iteration is lazy so huge intervals are never materialised.
    fn candidates(&self) -> impl Iterator<Item = u32> + '_ {
        self.intervals
            .iter()
            .flat_map(Interval::code_points)
            .filter(|&code_point| is_renderable(code_point))
    }

    /// Up to seven representative code points for width measurement
    ///
    /// Falls back to the code points of [`DEFAULT_TEST_STRING`] for the full
    /// range, and for ranges made only of control characters.
    pub fn test_code_points(&self) -> Vec<u32> {
        let derived: Vec<u32> = if self.is_full() {
            Vec::new()
        } else {
            self.candidates().take(TEST_STRING_LENGTH).collect()
        };

        if derived.is_empty() {
            DEFAULT_TEST_STRING.chars().map(u32::from).collect()
        } else {
            derived
        }
    }

    /// Representative test string for width based load detection
    pub fn to_test_string(&self) -> String {
        self.test_code_points()
            .into_iter()
            .filter_map(char::from_u32)
            .collect()
    }

    /// Representative test string as UTF-16 code units
    pub fn to_test_utf16(&self) -> Vec<u16> {
        encode_code_points(self.test_code_points())
    }
}

impl Default for UnicodeRange {
    fn default() -> Self {
        Self::full()
    }
}

/// C0 controls, space, C1 controls and surrogates never produce a glyph
fn is_renderable(code_point: u32) -> bool {
    code_point > 0x20 && !(0x80..=0x9F).contains(&code_point) && char::from_u32(code_point).is_some()
}

impl fmt::Display for UnicodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}

impl FromStr for UnicodeRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
