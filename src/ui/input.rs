//! Translation of raw egui input into surface pointer events.

use bevy::math::Vec2;
use bevy_egui::egui;

use crate::common::{PointerEvent, PointerKind, TouchPhase};

fn touch_phase(phase: egui::TouchPhase) -> TouchPhase {
    match phase {
        egui::TouchPhase::Start => TouchPhase::Start,
        egui::TouchPhase::Move => TouchPhase::Move,
        egui::TouchPhase::End => TouchPhase::End,
        egui::TouchPhase::Cancel => TouchPhase::Cancel,
    }
}

fn relative(pos: egui::Pos2, rect: egui::Rect) -> Vec2 {
    Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

/// Convert this frame's egui events into pointer events relative to `rect`.
///
/// Presses only count inside the rect. A move outside the rect becomes a
/// leave. egui synthesizes mouse events from touches, so when a frame carries
/// touch events its mouse events are dropped.
pub fn surface_pointer_events(events: &[egui::Event], rect: egui::Rect) -> Vec<PointerEvent> {
    let has_touch = events
        .iter()
        .any(|e| matches!(e, egui::Event::Touch { .. }));

    let mut out = Vec::new();
    for event in events {
        match event {
            egui::Event::Touch { phase, pos, .. } => {
                if *phase == egui::TouchPhase::Start && !rect.contains(*pos) {
                    continue;
                }
                out.push(PointerEvent::from_touch(touch_phase(*phase), relative(*pos, rect)));
            }
            _ if has_touch => {}
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    if rect.contains(*pos) {
                        out.push(PointerEvent::mouse(PointerKind::Down, relative(*pos, rect)));
                    }
                } else {
                    out.push(PointerEvent::mouse(PointerKind::Up, relative(*pos, rect)));
                }
            }
            egui::Event::PointerMoved(pos) => {
                let kind = if rect.contains(*pos) {
                    PointerKind::Move
                } else {
                    PointerKind::Leave
                };
                out.push(PointerEvent::mouse(kind, relative(*pos, rect)));
            }
            egui::Event::PointerGone => {
                out.push(PointerEvent::mouse(PointerKind::Leave, Vec2::ZERO));
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PointerSource;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(400.0, 300.0))
    }

    fn press(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn touch(phase: egui::TouchPhase, x: f32, y: f32) -> egui::Event {
        egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(1),
            phase,
            pos: egui::pos2(x, y),
            force: None,
        }
    }

    #[test]
    fn test_positions_are_relative_to_rect() {
        let events = surface_pointer_events(&[press(150.0, 80.0, true)], rect());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PointerKind::Down);
        assert_eq!(events[0].position, Vec2::new(50.0, 30.0));
    }

    #[test]
    fn test_press_outside_is_ignored_but_release_is_not() {
        let events = surface_pointer_events(
            &[press(10.0, 10.0, true), press(10.0, 10.0, false)],
            rect(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PointerKind::Up);
    }

    #[test]
    fn test_move_outside_becomes_leave() {
        let events = surface_pointer_events(
            &[
                egui::Event::PointerMoved(egui::pos2(200.0, 100.0)),
                egui::Event::PointerMoved(egui::pos2(600.0, 100.0)),
                egui::Event::PointerGone,
            ],
            rect(),
        );
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![PointerKind::Move, PointerKind::Leave, PointerKind::Leave]
        );
    }

    #[test]
    fn test_touch_suppresses_synthesized_mouse_events() {
        let events = surface_pointer_events(
            &[
                touch(egui::TouchPhase::Start, 120.0, 60.0),
                press(120.0, 60.0, true),
                egui::Event::PointerMoved(egui::pos2(120.0, 60.0)),
            ],
            rect(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PointerKind::Down);
        assert_eq!(events[0].source, PointerSource::Touch);
    }

    #[test]
    fn test_touch_cancel_maps_to_leave() {
        let events = surface_pointer_events(&[touch(egui::TouchPhase::Cancel, 120.0, 60.0)], rect());
        assert_eq!(events[0].kind, PointerKind::Leave);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let events = surface_pointer_events(
            &[egui::Event::PointerButton {
                pos: egui::pos2(150.0, 80.0),
                button: egui::PointerButton::Secondary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            }],
            rect(),
        );
        assert!(events.is_empty());
    }
}
