//! Typed font declarations
//!
//! The set of font properties is closed, so declarations are a record with
//! one optional field per property rather than a string keyed map.

use crate::font::parse_family_list;
use crate::identifier::quote_family;
use crate::{CssValueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A CSS property carried by [`FontDeclarations`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontProperty {
    Style,
    Variant,
    Weight,
    Stretch,
    Size,
    LineHeight,
    Family,
}

impl FontProperty {
    /// Properties in serialization order
    pub const ALL: [FontProperty; 7] = [
        FontProperty::Style,
        FontProperty::Variant,
        FontProperty::Weight,
        FontProperty::Stretch,
        FontProperty::Size,
        FontProperty::LineHeight,
        FontProperty::Family,
    ];

    /// CSS property name
    pub fn name(self) -> &'static str {
        match self {
            FontProperty::Style => "font-style",
            FontProperty::Variant => "font-variant",
            FontProperty::Weight => "font-weight",
            FontProperty::Stretch => "font-stretch",
            FontProperty::Size => "font-size",
            FontProperty::LineHeight => "line-height",
            FontProperty::Family => "font-family",
        }
    }
}

impl FromStr for FontProperty {
    type Err = CssValueError;

    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim();
        FontProperty::ALL
            .into_iter()
            .find(|property| property.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CssValueError::UnknownProperty(name.to_string()))
    }
}

/// Font related style declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDeclarations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family: Vec<String>,
}

impl FontDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build declarations from `(property, value)` pairs
    ///
    /// Unknown property names are rejected rather than carried along.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut declarations = Self::new();
        for (name, value) in pairs {
            declarations.set(name, value)?;
        }
        Ok(declarations)
    }

    /// Set a property from CSS text
    ///
    /// `font-family` values are parsed as a family list.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let property: FontProperty = name.parse()?;
        let value = value.trim().to_string();

        match property {
            FontProperty::Style => self.style = Some(value),
            FontProperty::Variant => self.variant = Some(value),
            FontProperty::Weight => self.weight = Some(value),
            FontProperty::Stretch => self.stretch = Some(value),
            FontProperty::Size => self.size = Some(value),
            FontProperty::LineHeight => self.line_height = Some(value),
            FontProperty::Family => self.family = parse_family_list(&value)?,
        }
        Ok(())
    }

    /// Serialized value of a property, if present
    pub fn get(&self, property: FontProperty) -> Option<String> {
        match property {
            FontProperty::Style => self.style.clone(),
            FontProperty::Variant => self.variant.clone(),
            FontProperty::Weight => self.weight.clone(),
            FontProperty::Stretch => self.stretch.clone(),
            FontProperty::Size => self.size.clone(),
            FontProperty::LineHeight => self.line_height.clone(),
            FontProperty::Family if self.family.is_empty() => None,
            FontProperty::Family => Some(
                self.family
                    .iter()
                    .map(|name| quote_family(name))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// Copy of these declarations with a different family list
    pub fn with_family<I, S>(&self, family: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            family: family.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Copy of these declarations without a family list
    pub fn without_family(&self) -> Self {
        Self {
            family: Vec::new(),
            ..self.clone()
        }
    }

    /// Present declarations as `(property, serialized value)` in CSS order
    pub fn iter(&self) -> impl Iterator<Item = (FontProperty, String)> + '_ {
        FontProperty::ALL
            .into_iter()
            .filter_map(move |property| self.get(property).map(|value| (property, value)))
    }

    /// Serialize to declaration text
    ///
    /// Declarations are separated by `;`, family names by `,`. With
    /// `important` every declaration carries `!important`.
    pub fn serialize(&self, important: bool) -> String {
        let suffix = if important { "!important" } else { "" };
        self.iter()
            .map(|(property, value)| format!("{}:{}{}", property.name(), value, suffix))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl fmt::Display for FontDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(false))
    }
}
