//! Session-level scenarios for the canvas engine.

use bevy::math::{UVec2, Vec2};
use image::{Rgba, RgbaImage};

use super::*;
use crate::common::{PointerEvent, PointerKind, SurfaceGeometry};

const MAX: UVec2 = UVec2::new(800, 600);

fn new_session() -> EditorSession {
    EditorSession::new(FontBook::approximate(), MAX)
}

fn photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([240, 240, 230, 255]))
}

fn session_with_background() -> EditorSession {
    let mut session = new_session();
    session.set_background(photo(400, 300)).unwrap();
    session
}

fn shown_at_native(session: &EditorSession) -> SurfaceGeometry {
    SurfaceGeometry {
        displayed_size: session.surface_size().as_vec2(),
    }
}

fn pointer(session: &mut EditorSession, kind: PointerKind, at: Vec2) -> PointerOutcome {
    let geometry = shown_at_native(session);
    session
        .handle_pointer(PointerEvent::mouse(kind, at), geometry)
        .unwrap()
}

#[test]
fn test_large_upload_is_fitted() {
    let mut session = new_session();
    session.set_background(photo(1600, 1200)).unwrap();
    assert_eq!(session.surface_size(), UVec2::new(800, 600));
    assert!(session.frame().is_some());
}

#[test]
fn test_replacing_background_resets_overlay() {
    let mut session = session_with_background();
    session
        .add_element("Paid", Vec2::new(50.0, 50.0), TextStyle::default())
        .unwrap();

    session.set_background(photo(200, 100)).unwrap();
    assert!(session.elements().is_empty());
    assert_eq!(session.surface_size(), UVec2::new(200, 100));
}

#[test]
fn test_render_bumps_revision() {
    let mut session = session_with_background();
    let before = session.revision();
    session
        .add_element("Paid", Vec2::new(50.0, 50.0), TextStyle::default())
        .unwrap();
    assert!(session.revision() > before);
}

#[test]
fn test_add_at_center_clears_draft() {
    let mut session = session_with_background();
    session.draft.text = "  Approved ".to_string();

    let id = session.add_element_at_center().unwrap();
    let element = session.model().get(id).unwrap();
    assert_eq!(element.text, "Approved");
    assert_eq!(element.position, Vec2::new(200.0, 150.0));
    assert!(session.draft.text.is_empty());
}

#[test]
fn test_add_at_center_rejects_blank_draft() {
    let mut session = session_with_background();
    session.draft.text = "   ".to_string();
    let err = session.add_element_at_center().unwrap_err();
    assert!(err.is_validation());
    assert!(session.elements().is_empty());
}

#[test]
fn test_click_places_pending_text() {
    let mut session = session_with_background();
    session.draft.text = "Signed".to_string();

    pointer(&mut session, PointerKind::Down, Vec2::new(120.0, 80.0));
    let outcome = pointer(&mut session, PointerKind::Up, Vec2::new(120.0, 80.0));

    assert_eq!(outcome, PointerOutcome::PlaceRequested(Vec2::new(120.0, 80.0)));
    assert_eq!(session.elements().len(), 1);
    assert_eq!(session.elements()[0].position, Vec2::new(120.0, 80.0));
    assert!(session.draft.text.is_empty());
}

#[test]
fn test_click_without_pending_text_places_nothing() {
    let mut session = session_with_background();
    pointer(&mut session, PointerKind::Down, Vec2::new(120.0, 80.0));
    pointer(&mut session, PointerKind::Up, Vec2::new(120.0, 80.0));
    assert!(session.elements().is_empty());
}

#[test]
fn test_pointer_ignored_without_background() {
    let mut session = new_session();
    session.draft.text = "Signed".to_string();
    pointer(&mut session, PointerKind::Down, Vec2::new(10.0, 10.0));
    let outcome = pointer(&mut session, PointerKind::Up, Vec2::new(10.0, 10.0));
    assert_eq!(outcome, PointerOutcome::Ignored);
    assert!(session.elements().is_empty());
}

#[test]
fn test_drag_on_scaled_display() {
    let mut session = session_with_background();
    let id = session
        .add_element("Stamp", Vec2::new(100.0, 100.0), TextStyle::default())
        .unwrap();

    // Surface (400x300) shown at half size
    let geometry = SurfaceGeometry {
        displayed_size: Vec2::new(200.0, 150.0),
    };
    let send = |session: &mut EditorSession, kind, at| {
        session
            .handle_pointer(PointerEvent::mouse(kind, at), geometry)
            .unwrap()
    };

    assert_eq!(send(&mut session, PointerKind::Down, Vec2::new(50.0, 50.0)), PointerOutcome::DragStarted(id));
    send(&mut session, PointerKind::Move, Vec2::new(75.0, 60.0));
    send(&mut session, PointerKind::Up, Vec2::new(75.0, 60.0));

    assert_eq!(session.model().get(id).unwrap().position, Vec2::new(150.0, 120.0));
    assert_eq!(session.selected_id(), Some(id));
    assert!(!session.is_dragging());
}

#[test]
fn test_edit_then_apply_draft() {
    let mut session = session_with_background();
    let id = session
        .add_element("Draft", Vec2::new(100.0, 100.0), TextStyle::default())
        .unwrap();

    session.edit_element(id).unwrap();
    assert_eq!(session.draft.text, "Draft");
    assert_eq!(session.selected_id(), Some(id));

    session.draft.text = "Final".to_string();
    session.draft.style.font_size = 40.0;
    session.apply_draft_to_selected().unwrap();

    let element = session.model().get(id).unwrap();
    assert_eq!(element.text, "Final");
    assert_eq!(element.style.font_size, 40.0);
    assert_eq!(element.position, Vec2::new(100.0, 100.0));
}

#[test]
fn test_apply_draft_without_selection() {
    let mut session = session_with_background();
    session.draft.text = "Orphan".to_string();
    assert!(matches!(
        session.apply_draft_to_selected(),
        Err(CanvasError::Validation(ValidationError::NoSelection))
    ));
}

#[test]
fn test_edit_unknown_element_is_not_found() {
    let mut session = session_with_background();
    let ghost = ElementId::new();
    assert!(matches!(
        session.edit_element(ghost),
        Err(CanvasError::ElementNotFound(id)) if id == ghost
    ));
}

#[test]
fn test_remove_is_idempotent() {
    let mut session = session_with_background();
    let id = session
        .add_element("Gone", Vec2::new(10.0, 10.0), TextStyle::default())
        .unwrap();
    assert!(session.remove_element(id).unwrap());
    assert!(!session.remove_element(id).unwrap());
}

#[test]
fn test_export_ignores_selection_and_leaves_state() {
    let mut session = EditorSession::new(FontBook::with_builtin_fonts(), MAX);
    session.set_background(photo(160, 80)).unwrap();
    let id = session
        .add_element("OK", Vec2::new(80.0, 40.0), TextStyle::default())
        .unwrap();

    let unselected = session.export_raster().unwrap();
    session.select(Some(id)).unwrap();
    let revision = session.revision();
    let selected = session.export_raster().unwrap();

    assert_eq!(unselected, selected);
    assert_eq!(session.selected_id(), Some(id));
    assert_eq!(session.revision(), revision);
}

#[test]
fn test_save_template_without_elements_is_rejected() {
    let session = session_with_background();
    let err = session.save_as_template("Empty").unwrap_err();
    assert!(matches!(err, CanvasError::Validation(ValidationError::NoElements)));
}

#[test]
fn test_save_template_without_background_is_rejected() {
    let mut session = new_session();
    session
        .add_element("Floating", Vec2::new(10.0, 10.0), TextStyle::default())
        .unwrap();
    let err = session.save_as_template("No image").unwrap_err();
    assert!(matches!(err, CanvasError::Validation(ValidationError::MissingBackground)));
}

#[test]
fn test_template_round_trip() {
    let mut session = session_with_background();
    session
        .add_element("Name", Vec2::new(60.0, 40.0), TextStyle::default())
        .unwrap();
    session
        .add_element("Date", Vec2::new(300.0, 250.0), TextStyle {
            font_size: 14.0,
            color: TextColor::rgb(200, 0, 0),
            font_family: "monospace".to_string(),
        })
        .unwrap();

    let template = session.save_as_template("Invoice").unwrap();
    assert_eq!(template.category, template::CUSTOM_CATEGORY);
    assert!(template.has_image());

    let mut other = new_session();
    assert_eq!(other.apply_template(&template).unwrap(), TemplateApplied::Ready);

    assert_eq!(other.surface_size(), UVec2::new(400, 300));
    assert_eq!(other.elements().len(), 2);
    for (a, b) in session.elements().iter().zip(other.elements()) {
        assert!(a.same_attributes(b));
    }
    assert_eq!(other.selected_id(), None);
}

#[test]
fn test_template_is_not_mutated_by_later_edits() {
    let mut session = session_with_background();
    let id = session
        .add_element("Original", Vec2::new(60.0, 40.0), TextStyle::default())
        .unwrap();
    let template = session.save_as_template("Snapshot").unwrap();

    session
        .update_element(id, &ElementPatch::position(Vec2::new(1.0, 1.0)))
        .unwrap();
    assert_eq!(template.text_elements[0].position, Vec2::new(60.0, 40.0));
}

#[test]
fn test_corrupt_template_leaves_session_untouched() {
    let mut session = session_with_background();
    session
        .add_element("Keep", Vec2::new(60.0, 40.0), TextStyle::default())
        .unwrap();

    let mut template = session.save_as_template("Broken").unwrap();
    template.image_data = "data:image/png;base64,AAAA".to_string();
    template.text_elements.clear();

    assert!(session.apply_template(&template).is_err());
    assert_eq!(session.elements().len(), 1);
    assert!(session.has_background());
}

#[test]
fn test_stub_template_waits_for_image() {
    let mut stub = ImageTemplate::stub(&TemplateMeta {
        name: "Lease".to_string(),
        ..Default::default()
    })
    .unwrap();
    let mut source = new_session();
    source
        .add_element("Tenant", Vec2::new(40.0, 40.0), TextStyle::default())
        .unwrap();
    stub.text_elements = source.model().snapshot();

    let mut session = session_with_background();
    assert_eq!(session.apply_template(&stub).unwrap(), TemplateApplied::NeedsImage);
    assert!(!session.has_background());

    // First upload after a stub keeps the template's elements
    session.set_background(photo(300, 200)).unwrap();
    assert_eq!(session.elements().len(), 1);
    assert_eq!(session.elements()[0].text, "Tenant");
}

fn template_with_element(edit: impl FnOnce(&mut TextElement)) -> ImageTemplate {
    let mut source = session_with_background();
    source
        .add_element("Signed", Vec2::new(60.0, 40.0), TextStyle::default())
        .unwrap();
    let mut template = source.save_as_template("Stored").unwrap();
    edit(&mut template.text_elements[0]);
    template
}

#[test]
fn test_template_with_negative_font_size_is_rejected() {
    let template = template_with_element(|e| e.style.font_size = -1.0);
    let mut session = session_with_background();
    session
        .add_element("Keep", Vec2::new(20.0, 20.0), TextStyle::default())
        .unwrap();

    let err = session.apply_template(&template).unwrap_err();
    assert!(matches!(
        err,
        CanvasError::Validation(ValidationError::InvalidFontSize(_))
    ));
    assert_eq!(session.elements().len(), 1);
    assert_eq!(session.elements()[0].text, "Keep");
}

#[test]
fn test_template_with_empty_text_is_rejected() {
    let template = template_with_element(|e| e.text = "   ".to_string());
    let mut session = new_session();
    let err = session.apply_template(&template).unwrap_err();
    assert!(matches!(err, CanvasError::Validation(ValidationError::EmptyText)));
    assert!(session.elements().is_empty());
    assert!(!session.has_background());
}

#[test]
fn test_template_with_huge_font_size_is_rejected() {
    let template = template_with_element(|e| e.style.font_size = 1e6);
    let mut session = new_session();
    assert!(session.apply_template(&template).is_err());
}

#[test]
fn test_failed_render_keeps_model() {
    let mut session = EditorSession::new(FontBook::approximate(), UVec2::ZERO);
    let revision = session.revision();

    let err = session
        .add_element("Lost", Vec2::new(0.0, 0.0), TextStyle::default())
        .unwrap_err();
    assert!(matches!(err, CanvasError::InvalidSurface { .. }));
    assert!(session.elements().is_empty());
    assert_eq!(session.revision(), revision);
    assert!(session.clear_all().is_err());
}
