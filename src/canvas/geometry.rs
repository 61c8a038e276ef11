//! Surface geometry helpers: device-to-logical mapping and background sizing.

use bevy::math::{Rect, UVec2, Vec2};

/// Map a device-space point (relative to the displayed surface's top-left)
/// into surface-logical coordinates, compensating for display scaling.
///
/// A degenerate displayed size leaves that axis unscaled.
pub fn device_to_logical(device: Vec2, surface_size: Vec2, displayed_size: Vec2) -> Vec2 {
    let scale = |surface: f32, displayed: f32| {
        if displayed > 0.0 {
            surface / displayed
        } else {
            1.0
        }
    };
    Vec2::new(
        device.x * scale(surface_size.x, displayed_size.x),
        device.y * scale(surface_size.y, displayed_size.y),
    )
}

/// Scale `native` down to fit inside `max` preserving aspect ratio.
///
/// Images already within bounds keep their native size. Results are floored
/// (a fractional surface dimension truncates) and never collapse below 1px.
pub fn fit_within(native: UVec2, max: UVec2) -> UVec2 {
    if native.x == 0 || native.y == 0 {
        return native.max(UVec2::ONE);
    }
    if native.x <= max.x && native.y <= max.y {
        return native;
    }

    // Cross-multiplied aspect comparison; integer division floors
    let (nx, ny) = (native.x as u64, native.y as u64);
    let (mx, my) = (max.x as u64, max.y as u64);
    let (width, height) = if nx * my >= ny * mx {
        (mx, ny * mx / nx)
    } else {
        (nx * my / ny, my)
    };
    UVec2::new((width as u32).max(1), (height as u32).max(1))
}

/// Box of `size` centered on `anchor`.
pub fn centered_box(anchor: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(anchor, size)
}

/// Inclusive containment test (points on the edge count as inside).
pub fn box_contains(rect: &Rect, point: Vec2) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}
