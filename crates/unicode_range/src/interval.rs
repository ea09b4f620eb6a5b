//! Closed code point intervals

use crate::{RangeError, Result, MAX_CODE_POINT};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A closed interval `[start, end]` of Unicode code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    start: u32,
    end: u32,
}

impl Interval {
    /// Create an interval, rejecting inverted or out of range bounds
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        if end > MAX_CODE_POINT {
            return Err(RangeError::OutOfRange { value: end });
        }
        Ok(Self { start, end })
    }

    /// Interval covering a single code point
    pub fn single(code_point: u32) -> Result<Self> {
        Self::new(code_point, code_point)
    }

    /// The complete code point space
    pub const fn full() -> Self {
        Self {
            start: 0,
            end: MAX_CODE_POINT,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Check whether a code point lies inside this interval
    pub fn contains(&self, code_point: u32) -> bool {
        code_point >= self.start && code_point <= self.end
    }

    /// Check whether two intervals share at least one code point
    pub fn intersects(&self, other: &Interval) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Iterate over every code point in the interval
    pub fn code_points(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "u+{:x}", self.start)
        } else {
            write!(f, "u+{:x}-{:x}", self.start, self.end)
        }
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^u\+([0-9a-f?]{1,6})(?:-([0-9a-f]{1,6}))?$")
            .expect("unicode-range token pattern is valid")
    })
}

fn parse_hex(digits: &str, token: &str) -> Result<u32> {
    u32::from_str_radix(digits, 16).map_err(|_| RangeError::Syntax {
        token: token.to_string(),
    })
}

impl FromStr for Interval {
    type Err = RangeError;

    /// Parse one `u+XXXX`, `u+XX??` or `u+XXXX-YYYY` token
    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        let captures = token_pattern()
            .captures(token)
            .ok_or_else(|| RangeError::Syntax {
                token: token.to_string(),
            })?;

        let start_digits = &captures[1];

        // A wildcard token spans every value of its `?` nibbles, any explicit end is ignored
        if start_digits.contains('?') {
            let low = parse_hex(&start_digits.replace('?', "0"), token)?;
            let high = parse_hex(&start_digits.replace('?', "f"), token)?;
            return Interval::new(low, high);
        }

        let start = parse_hex(start_digits, token)?;
        let end = match captures.get(2) {
            Some(end) => parse_hex(end.as_str(), token)?,
            None => start,
        };
        Interval::new(start, end)
    }
}
