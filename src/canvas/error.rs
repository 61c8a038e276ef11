//! Error taxonomy for canvas operations.
//!
//! None of these are fatal: every failing command leaves the session state
//! untouched and the interaction state back at idle.

use thiserror::Error;

use super::element::ElementId;

/// Input that a command refuses to act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("font size must be a positive number up to {max}, got {0}", max = crate::constants::MAX_FONT_SIZE)]
    InvalidFontSize(String),
    #[error("invalid color value: {0:?}")]
    InvalidColor(String),
    #[error("no ink on the signature surface")]
    EmptySignature,
    #[error("a background image is required")]
    MissingBackground,
    #[error("a template needs at least one text element")]
    NoElements,
    #[error("no text element is selected")]
    NoSelection,
    #[error("template name must not be empty")]
    EmptyTemplateName,
    #[error("not an image file: {0}")]
    NotAnImage(String),
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("text element {0} not found")]
    ElementNotFound(ElementId),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSurface { width: u32, height: u32 },
}

impl CanvasError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CanvasError::Validation(_))
    }
}

impl From<image::ImageError> for CanvasError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Encoding(e) => CanvasError::Encode(e.to_string()),
            other => CanvasError::Decode(other.to_string()),
        }
    }
}

pub type CanvasResult<T> = Result<T, CanvasError>;
