//! Error types for CSS value parsing

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssValueError {
    #[error("Unterminated quoted string")]
    UnterminatedString,

    #[error("Font value has no font size")]
    MissingSize,

    #[error("Font value has no font family")]
    MissingFamily,

    #[error("Invalid font family identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid line height: {0:?}")]
    InvalidLineHeight(String),

    #[error("Unexpected content after quoted family name: {0:?}")]
    TrailingContent(String),

    #[error("Unknown font property: {0}")]
    UnknownProperty(String),
}

pub type Result<T> = std::result::Result<T, CssValueError>;
