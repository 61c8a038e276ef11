//! Text element types placed on the editor surface.

use std::fmt;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::TextColor;
use super::error::ValidationError;
use crate::constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, MAX_FONT_SIZE};

/// Opaque identifier for a text element, generated at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Styling attributes shared by the draft input and placed elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in surface pixels
    pub font_size: f32,
    pub color: TextColor,
    pub font_family: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: TextColor::BLACK,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl TextStyle {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_font_size(self.font_size)
    }
}

pub(crate) fn validate_font_size(size: f32) -> Result<(), ValidationError> {
    if size.is_finite() && size > 0.0 && size <= MAX_FONT_SIZE {
        Ok(())
    } else {
        Err(ValidationError::InvalidFontSize(size.to_string()))
    }
}

/// A positioned text label. The anchor is the center of the rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub text: String,
    pub position: Vec2,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl TextElement {
    /// Check an element that did not come through `add_element`, such as one
    /// read back from a stored template.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        self.style.validate()
    }

    /// Compares every attribute except the identifier.
    pub fn same_attributes(&self, other: &TextElement) -> bool {
        self.text == other.text && self.position == other.position && self.style == other.style
    }
}

/// Partial update merged into an existing element. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub text: Option<String>,
    pub position: Option<Vec2>,
    pub font_size: Option<f32>,
    pub color: Option<TextColor>,
    pub font_family: Option<String>,
}

impl ElementPatch {
    pub fn position(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Patch carrying text plus every style attribute, as produced by the edit panel.
    pub fn from_draft(text: &str, style: &TextStyle) -> Self {
        Self {
            text: Some(text.to_string()),
            position: None,
            font_size: Some(style.font_size),
            color: Some(style.color),
            font_family: Some(style.font_family.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.position.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
            && self.font_family.is_none()
    }

    /// Reject patches that would break element invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(text) = &self.text
            && text.trim().is_empty()
        {
            return Err(ValidationError::EmptyText);
        }
        if let Some(size) = self.font_size {
            validate_font_size(size)?;
        }
        Ok(())
    }

    pub(crate) fn apply_to(&self, element: &mut TextElement) {
        if let Some(text) = &self.text {
            element.text = text.trim().to_string();
        }
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(size) = self.font_size {
            element.style.font_size = size;
        }
        if let Some(color) = self.color {
            element.style.color = color;
        }
        if let Some(family) = &self.font_family {
            element.style.font_family = family.clone();
        }
    }
}
