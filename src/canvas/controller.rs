//! Pointer state machine for selecting, dragging and click-placing text.
//!
//! ```text
//! Idle --down on element--> Dragging --move--> Dragging (anchor follows pointer)
//!   |                          |
//!   |                          +--up / leave--> Idle
//!   +--down on empty--> Pressed --up (no move)--> Idle + place request
//!                          +--move / leave--> Idle
//! ```
//!
//! A press that lands on an element always starts a drag, even if it is
//! released without moving; click-to-place only applies to empty areas.

use bevy::math::Vec2;

use super::element::ElementId;
use super::fonts::FontBook;
use super::hit_testing::hit_test;
use super::model::AnnotationModel;
use crate::common::{CursorHint, PointerKind};

/// Movement (in logical pixels) tolerated between press and release of a click.
pub const CLICK_SLOP: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on empty surface; releasing in place is a click
    Pressed { at: Vec2 },
    Dragging {
        id: ElementId,
        /// Pointer position minus the element anchor at press time
        offset: Vec2,
    },
}

/// What a pointer event did to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    /// Press landed on an element: it is now selected and being dragged
    DragStarted(ElementId),
    Moved(ElementId),
    DragEnded(ElementId),
    /// Click on empty surface at this logical point
    PlaceRequested(Vec2),
    /// The dragged element disappeared mid-gesture
    DragLost,
}

impl PointerOutcome {
    /// Whether the surface must be recomposited.
    pub fn needs_render(&self) -> bool {
        matches!(
            self,
            PointerOutcome::DragStarted(_) | PointerOutcome::Moved(_) | PointerOutcome::DragLost
        )
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// Feed one pointer event (already in logical coordinates).
    pub fn handle(
        &mut self,
        kind: PointerKind,
        point: Vec2,
        model: &mut AnnotationModel,
        fonts: &FontBook,
    ) -> PointerOutcome {
        match (kind, self.state) {
            (PointerKind::Down, _) => self.press(point, model, fonts),

            (PointerKind::Move, DragState::Dragging { id, offset }) => {
                match model.get_mut(id) {
                    Some(element) => {
                        element.position = point - offset;
                        PointerOutcome::Moved(id)
                    }
                    None => {
                        tracing::warn!("Dragged element {} vanished, ending drag", id);
                        self.state = DragState::Idle;
                        PointerOutcome::DragLost
                    }
                }
            }
            (PointerKind::Move, DragState::Pressed { at }) => {
                if point.distance(at) > CLICK_SLOP {
                    self.state = DragState::Idle;
                }
                PointerOutcome::Ignored
            }

            (PointerKind::Up | PointerKind::Leave, DragState::Dragging { id, .. }) => {
                self.state = DragState::Idle;
                if model.contains(id) {
                    PointerOutcome::DragEnded(id)
                } else {
                    PointerOutcome::DragLost
                }
            }
            (PointerKind::Up, DragState::Pressed { at }) => {
                self.state = DragState::Idle;
                if point.distance(at) <= CLICK_SLOP {
                    PointerOutcome::PlaceRequested(point)
                } else {
                    PointerOutcome::Ignored
                }
            }
            (PointerKind::Leave, DragState::Pressed { .. }) => {
                self.state = DragState::Idle;
                PointerOutcome::Ignored
            }

            (PointerKind::Move | PointerKind::Up | PointerKind::Leave, DragState::Idle) => {
                PointerOutcome::Ignored
            }
        }
    }

    fn press(&mut self, point: Vec2, model: &mut AnnotationModel, fonts: &FontBook) -> PointerOutcome {
        match hit_test(point, model.elements(), fonts).and_then(|id| model.get(id)) {
            Some(element) => {
                let id = element.id;
                let offset = point - element.position;
                model.select(Some(id));
                self.state = DragState::Dragging { id, offset };
                PointerOutcome::DragStarted(id)
            }
            None => {
                self.state = DragState::Pressed { at: point };
                PointerOutcome::Ignored
            }
        }
    }

    /// Cursor to show while hovering `point` in the current state.
    pub fn cursor_hint(
        &self,
        point: Vec2,
        model: &AnnotationModel,
        fonts: &FontBook,
        has_pending_text: bool,
    ) -> CursorHint {
        if self.is_dragging() {
            return CursorHint::Grabbing;
        }
        if hit_test(point, model.elements(), fonts).is_some() {
            CursorHint::Grab
        } else if has_pending_text {
            CursorHint::Place
        } else {
            CursorHint::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::element::TextStyle;
    use proptest::prelude::*;

    fn setup() -> (DragController, AnnotationModel, FontBook, ElementId) {
        let fonts = FontBook::approximate();
        let mut model = AnnotationModel::new();
        let id = model
            .add_element("Label", Vec2::new(100.0, 100.0), TextStyle::default())
            .unwrap()
            .id;
        (DragController::default(), model, fonts, id)
    }

    #[test]
    fn test_press_on_element_starts_drag_and_selects() {
        let (mut ctl, mut model, fonts, id) = setup();
        let outcome = ctl.handle(PointerKind::Down, Vec2::new(105.0, 102.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::DragStarted(id));
        assert_eq!(model.selected_id(), Some(id));
        assert_eq!(
            ctl.state(),
            DragState::Dragging {
                id,
                offset: Vec2::new(5.0, 2.0)
            }
        );
    }

    #[test]
    fn test_move_keeps_grab_offset() {
        let (mut ctl, mut model, fonts, id) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(105.0, 102.0), &mut model, &fonts);
        let outcome = ctl.handle(PointerKind::Move, Vec2::new(205.0, 152.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::Moved(id));
        assert_eq!(model.get(id).unwrap().position, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_release_returns_to_idle() {
        let (mut ctl, mut model, fonts, id) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(100.0, 100.0), &mut model, &fonts);
        let outcome = ctl.handle(PointerKind::Up, Vec2::new(100.0, 100.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::DragEnded(id));
        assert_eq!(ctl.state(), DragState::Idle);

        // Further moves do nothing
        ctl.handle(PointerKind::Move, Vec2::new(300.0, 300.0), &mut model, &fonts);
        assert_eq!(model.get(id).unwrap().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_leave_ends_drag() {
        let (mut ctl, mut model, fonts, id) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(100.0, 100.0), &mut model, &fonts);
        let outcome = ctl.handle(PointerKind::Leave, Vec2::new(900.0, 100.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::DragEnded(id));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_element_removed_mid_drag() {
        let (mut ctl, mut model, fonts, id) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(100.0, 100.0), &mut model, &fonts);
        model.remove_element(id);
        let outcome = ctl.handle(PointerKind::Move, Vec2::new(120.0, 100.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::DragLost);
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn test_click_on_empty_requests_placement() {
        let (mut ctl, mut model, fonts, _) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(400.0, 300.0), &mut model, &fonts);
        let outcome = ctl.handle(PointerKind::Up, Vec2::new(401.0, 300.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::PlaceRequested(Vec2::new(401.0, 300.0)));
    }

    #[test]
    fn test_press_move_release_on_empty_is_not_a_click() {
        let (mut ctl, mut model, fonts, _) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(400.0, 300.0), &mut model, &fonts);
        ctl.handle(PointerKind::Move, Vec2::new(450.0, 300.0), &mut model, &fonts);
        let outcome = ctl.handle(PointerKind::Up, Vec2::new(400.0, 300.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::Ignored);
    }

    #[test]
    fn test_click_on_element_is_a_drag_not_a_placement() {
        let (mut ctl, mut model, fonts, id) = setup();
        ctl.handle(PointerKind::Down, Vec2::new(100.0, 100.0), &mut model, &fonts);
        let outcome = ctl.handle(PointerKind::Up, Vec2::new(100.0, 100.0), &mut model, &fonts);
        assert_eq!(outcome, PointerOutcome::DragEnded(id));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_cursor_hints() {
        let (mut ctl, mut model, fonts, _) = setup();
        assert_eq!(ctl.cursor_hint(Vec2::new(100.0, 100.0), &model, &fonts, false), CursorHint::Grab);
        assert_eq!(ctl.cursor_hint(Vec2::new(500.0, 500.0), &model, &fonts, true), CursorHint::Place);
        assert_eq!(ctl.cursor_hint(Vec2::new(500.0, 500.0), &model, &fonts, false), CursorHint::None);
        ctl.handle(PointerKind::Down, Vec2::new(100.0, 100.0), &mut model, &fonts);
        assert_eq!(ctl.cursor_hint(Vec2::new(500.0, 500.0), &model, &fonts, false), CursorHint::Grabbing);
    }

    proptest! {
        #[test]
        fn prop_drag_there_and_back_restores_anchor(
            grab_x in -20.0f32..20.0,
            grab_y in -8.0f32..8.0,
            dx in -500.0f32..500.0,
            dy in -500.0f32..500.0,
        ) {
            let (mut ctl, mut model, fonts, id) = setup();
            let original = model.get(id).unwrap().position;
            let start = original + Vec2::new(grab_x, grab_y);

            ctl.handle(PointerKind::Down, start, &mut model, &fonts);
            ctl.handle(PointerKind::Move, start + Vec2::new(dx, dy), &mut model, &fonts);
            ctl.handle(PointerKind::Move, start, &mut model, &fonts);
            ctl.handle(PointerKind::Up, start, &mut model, &fonts);

            let restored = model.get(id).unwrap().position;
            prop_assert!(restored.distance(original) < 1e-3);
        }
    }
}
