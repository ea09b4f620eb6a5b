//! `@font-face` descriptors

use crate::Result;
use css_value::{normalize_weight, quote_string, FontDeclarations, FontValue, INITIAL_VALUE};
use serde::{Deserialize, Serialize};
use unicode_range::UnicodeRange;

/// Initial value of the `unicode-range` descriptor
pub const FULL_UNICODE_RANGE: &str = "u+0-10ffff";

/// Descriptors of one web font face
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFaceDescriptors {
    pub family: String,
    pub style: String,
    pub weight: String,
    pub stretch: String,
    pub unicode_range: String,
    pub variant: String,
    pub feature_settings: String,
}

impl Default for FontFaceDescriptors {
    fn default() -> Self {
        Self {
            family: String::new(),
            style: INITIAL_VALUE.to_string(),
            weight: INITIAL_VALUE.to_string(),
            stretch: INITIAL_VALUE.to_string(),
            unicode_range: FULL_UNICODE_RANGE.to_string(),
            variant: INITIAL_VALUE.to_string(),
            feature_settings: INITIAL_VALUE.to_string(),
        }
    }
}

impl FontFaceDescriptors {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn with_stretch(mut self, stretch: impl Into<String>) -> Self {
        self.stretch = stretch.into();
        self
    }

    pub fn with_unicode_range(mut self, range: impl Into<String>) -> Self {
        self.unicode_range = range.into();
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_feature_settings(mut self, settings: impl Into<String>) -> Self {
        self.feature_settings = settings.into();
        self
    }

    /// Parsed `unicode-range` descriptor
    pub fn unicode_range(&self) -> Result<UnicodeRange> {
        Ok(UnicodeRange::parse(&self.unicode_range)?)
    }

    /// Text rendered while detecting this face
    pub fn test_string(&self) -> Result<String> {
        Ok(self.unicode_range()?.to_test_string())
    }

    /// True if every character of `text` lies in the face's unicode range
    pub fn covers(&self, text: &str) -> Result<bool> {
        let range = self.unicode_range()?;
        Ok(text.chars().all(|c| range.contains(c as u32)))
    }

    /// Style declarations selecting this face, without a family list
    pub fn declarations(&self) -> FontDeclarations {
        FontDeclarations {
            style: Some(self.style.clone()),
            variant: Some(self.variant.clone()),
            weight: Some(self.weight.clone()),
            stretch: Some(self.stretch.clone()),
            ..Default::default()
        }
    }

    /// Render the `@font-face` rule with `src` as its source list
    pub fn to_css(&self, src: &str) -> String {
        format!(
            "@font-face{{font-family:{};src:{};font-style:{};font-weight:{};unicode-range:{};}}",
            quote_string(&self.family),
            src,
            self.style,
            self.weight,
            self.unicode_range
        )
    }

    /// True if a parsed font value would select this face
    ///
    /// Families compare case-insensitively and weights after
    /// normalization, so `bold` selects a `700` face.
    pub fn matches(&self, font: &FontValue) -> bool {
        let family = font
            .family
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&self.family));

        let requested = font.weight_or_initial();
        let weight = match (normalize_weight(requested), normalize_weight(&self.weight)) {
            (Some(a), Some(b)) => a == b,
            _ => requested.eq_ignore_ascii_case(&self.weight),
        };

        family
            && weight
            && font.style_or_initial().eq_ignore_ascii_case(&self.style)
            && font.stretch_or_initial().eq_ignore_ascii_case(&self.stretch)
    }
}
