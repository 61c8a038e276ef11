//! Canvas engine: text annotation over a background image, and freehand
//! signature capture.
//!
//! Everything here is plain Rust with no ECS dependency. The bevy side owns an
//! [`EditorSession`] and a [`SignatureCapture`] as resources and forwards
//! normalized pointer events into them.
//!
//! ## Module Structure
//!
//! - [`element`] - TextElement, TextStyle and partial updates
//! - [`model`] - Ordered element sequence plus selection
//! - [`hit_testing`] - Element bounds and topmost-hit lookup
//! - [`controller`] - Drag / click-to-place state machine
//! - [`rendering`] - Compositing with tiny-skia
//! - [`export`] - PNG and data URI encoding, image decoding
//! - [`template`] - ImageTemplate records
//! - [`session`] - EditorSession tying the above together
//! - [`signature`] - Freehand stroke capture
//!
//! ## Coordinates
//!
//! Element positions are in surface pixels and mark the center of the text.
//! Pointer positions arrive in displayed (device) pixels and are mapped per
//! axis with [`geometry::device_to_logical`].

pub mod color;
pub mod controller;
pub mod element;
pub mod error;
pub mod export;
pub mod fonts;
pub mod geometry;
pub mod hit_testing;
pub mod model;
pub mod rendering;
pub mod session;
pub mod signature;
pub mod template;

#[cfg(test)]
mod tests;

pub use color::TextColor;
pub use controller::PointerOutcome;
pub use element::{ElementId, ElementPatch, TextElement, TextStyle};
pub use error::{CanvasError, CanvasResult, ValidationError};
pub use fonts::FontBook;
pub use session::{Draft, EditorSession, TemplateApplied};
pub use signature::SignatureCapture;
pub use template::{ImageTemplate, TemplateId, TemplateMeta};
