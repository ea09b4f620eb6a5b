//! Error types for unicode-range parsing

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Invalid unicode-range token: {token:?}")]
    Syntax { token: String },

    #[error("Empty unicode-range descriptor")]
    Empty,

    #[error("Inverted interval: u+{start:x} is after u+{end:x}")]
    Inverted { start: u32, end: u32 },

    #[error("Code point u+{value:x} is above u+10ffff")]
    OutOfRange { value: u32 },
}

pub type Result<T> = std::result::Result<T, RangeError>;
