//! Common types shared across multiple modules.
//!
//! The normalized pointer vocabulary lives here: mouse and touch input are both
//! mapped into [`PointerEvent`] before reaching the annotation controller or the
//! signature pad, so neither engine knows where input came from.

use bevy::math::Vec2;
use bevy_egui::egui;

/// Where a pointer event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer left the surface (or the touch was cancelled)
    Leave,
}

/// Touch lifecycle as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Normalized pointer input.
///
/// `position` is in device pixels relative to the top-left corner of the
/// displayed surface; engines map it to logical coordinates themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Vec2,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(kind: PointerKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            source: PointerSource::Mouse,
        }
    }

    /// Touch points carry position only; pressure and tilt are dropped.
    pub fn from_touch(phase: TouchPhase, position: Vec2) -> Self {
        let kind = match phase {
            TouchPhase::Start => PointerKind::Down,
            TouchPhase::Move => PointerKind::Move,
            TouchPhase::End => PointerKind::Up,
            TouchPhase::Cancel => PointerKind::Leave,
        };
        Self {
            kind,
            position,
            source: PointerSource::Touch,
        }
    }
}

/// Displayed geometry of a surface at the time an event was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// On-screen size the surface is drawn at (may differ from its backing size)
    pub displayed_size: Vec2,
}

/// Cursor feedback for the surface under the pointer.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CursorHint {
    #[default]
    None,
    /// Hovering an element that can be dragged
    Grab,
    Grabbing,
    /// Click would place the pending text
    Place,
    /// Over the signature pad
    Draw,
}

impl CursorHint {
    /// Get the appropriate egui cursor for this hint.
    pub fn cursor_icon(&self) -> Option<egui::CursorIcon> {
        match self {
            CursorHint::None => None,
            CursorHint::Grab => Some(egui::CursorIcon::Grab),
            CursorHint::Grabbing => Some(egui::CursorIcon::Grabbing),
            CursorHint::Place => Some(egui::CursorIcon::Cell),
            CursorHint::Draw => Some(egui::CursorIcon::Crosshair),
        }
    }
}
