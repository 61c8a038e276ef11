//! Centralized color theme for the editor UI.
//!
//! Canvas rendering colors (selection outline, shadow) live in
//! [`crate::constants`] because they end up in exported images.

use bevy_egui::egui;

use crate::canvas::TextColor;

// ============================================================================
// Surface
// ============================================================================

/// Backdrop behind the editing surface
pub const SURFACE_BACKDROP: egui::Color32 = egui::Color32::from_rgb(32, 32, 36);

/// Signature pad paper
pub const SIGNATURE_PAPER: egui::Color32 = egui::Color32::WHITE;

// ============================================================================
// Text
// ============================================================================

/// Secondary labels and hints
pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

/// Inline error labels
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(230, 100, 100);

// ============================================================================
// Notifications
// ============================================================================

pub const NOTIFICATION_SUCCESS: egui::Color32 = egui::Color32::from_rgb(40, 90, 50);
pub const NOTIFICATION_ERROR: egui::Color32 = egui::Color32::from_rgb(120, 40, 40);

// ============================================================================
// Text color swatches
// ============================================================================

/// Quick picks shown next to the text color editor
pub fn text_swatches() -> [(TextColor, &'static str); 6] {
    [
        (TextColor::BLACK, "Black"),
        (TextColor::WHITE, "White"),
        (TextColor::rgb(220, 30, 30), "Red"),
        (TextColor::rgb(30, 80, 200), "Blue"),
        (TextColor::rgb(20, 140, 60), "Green"),
        (TextColor::rgb(0x66, 0x7e, 0xea), "Indigo"),
    ]
}

pub fn to_egui(color: TextColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatches_are_opaque_and_distinct() {
        let swatches = text_swatches();
        for (i, (color, _)) in swatches.iter().enumerate() {
            assert_eq!(color.a, 255);
            assert!(swatches[i + 1..].iter().all(|(other, _)| other != color));
        }
    }

    #[test]
    fn test_to_egui_keeps_channels() {
        let color = to_egui(TextColor::rgb(1, 2, 3));
        assert_eq!((color.r(), color.g(), color.b(), color.a()), (1, 2, 3, 255));
    }
}
