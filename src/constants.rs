//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1400.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 860.0;

/// Bounding box an uploaded background is scaled down to fit (never up).
pub const MAX_SURFACE_WIDTH: u32 = 800;
pub const MAX_SURFACE_HEIGHT: u32 = 600;

/// Draft style defaults for new text elements
pub const DEFAULT_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
/// Range offered by the font size control. Larger sizes are rejected.
pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 200.0;
pub const MONOSPACE_FONT_FAMILY: &str = "monospace";

/// Padding between the measured text box and the dashed selection outline
pub const SELECTION_PADDING: f32 = 5.0;
pub const SELECTION_STROKE_WIDTH: f32 = 2.0;
pub const SELECTION_DASH: [f32; 2] = [5.0, 5.0];
/// Selection outline color (#667eea)
pub const SELECTION_COLOR: [u8; 3] = [0x66, 0x7e, 0xea];

/// Drop shadow painted under every text element
pub const SHADOW_OFFSET: (i32, i32) = (1, 1);
pub const SHADOW_BLUR_RADIUS: usize = 2;
/// Shadow color alpha (rgba(0,0,0,0.5))
pub const SHADOW_ALPHA: u8 = 128;

/// Signature capture surface defaults
pub const SIGNATURE_WIDTH: u32 = 560;
pub const SIGNATURE_HEIGHT: u32 = 250;
pub const SIGNATURE_STROKE_WIDTH: f32 = 2.0;

/// Record store keys
pub const IMAGE_TEMPLATES_KEY: &str = "image_templates";
pub const AGREEMENTS_KEY: &str = "agreements";

/// How long transient notifications stay on screen, in seconds
pub const NOTIFICATION_SECONDS: f32 = 4.0;
