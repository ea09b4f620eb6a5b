//! Error types for font loading

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Timeout while loading font \"{family}\" after {elapsed:?}")]
    Timeout { family: String, elapsed: Duration },

    #[error("Loading font \"{family}\" was cancelled")]
    Cancelled { family: String },

    #[error("Font value names no font family")]
    NoFamilies,

    #[error("Font face \"{family}\" has no url() source")]
    NoSources { family: String },

    #[error("Invalid font value: {0}")]
    Value(#[from] css_value::CssValueError),

    #[error("Invalid unicode range: {0}")]
    Range(#[from] unicode_range::RangeError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LoadError {
    /// Family the failed session was watching, if any
    pub fn family(&self) -> Option<&str> {
        match self {
            LoadError::Timeout { family, .. }
            | LoadError::Cancelled { family }
            | LoadError::NoSources { family } => Some(family),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
