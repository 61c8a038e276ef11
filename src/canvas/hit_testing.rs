//! Hit testing functions for detecting clicks on text elements.

use bevy::math::{Rect, Vec2};

use super::element::{ElementId, TextElement};
use super::fonts::FontBook;
use super::geometry::{box_contains, centered_box};

/// Bounding box of a text element: measured width by font-size height,
/// centered on the anchor.
pub fn element_bounds(element: &TextElement, fonts: &FontBook) -> Rect {
    let size = fonts.measure(
        &element.text,
        element.style.font_size,
        &element.style.font_family,
    );
    centered_box(element.position, size)
}

/// Check if a point is inside a text element's bounding box
pub fn point_in_element(point: Vec2, element: &TextElement, fonts: &FontBook) -> bool {
    box_contains(&element_bounds(element, fonts), point)
}

/// Topmost element under `point`.
///
/// Walks the sequence from the most recently added element backwards, so an
/// element painted later (on top) wins over earlier overlapping ones.
pub fn hit_test(point: Vec2, elements: &[TextElement], fonts: &FontBook) -> Option<ElementId> {
    elements
        .iter()
        .rev()
        .find(|e| point_in_element(point, e, fonts))
        .map(|e| e.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::element::TextStyle;
    use crate::canvas::model::AnnotationModel;

    fn style(size: f32) -> TextStyle {
        TextStyle {
            font_size: size,
            ..Default::default()
        }
    }

    #[test]
    fn test_hit_at_anchor_and_miss_far_away() {
        let fonts = FontBook::with_builtin_fonts();
        let mut model = AnnotationModel::new();
        let a = model
            .add_element("A", Vec2::new(100.0, 100.0), style(20.0))
            .unwrap()
            .id;

        assert_eq!(hit_test(Vec2::new(100.0, 100.0), model.elements(), &fonts), Some(a));
        assert_eq!(hit_test(Vec2::new(500.0, 500.0), model.elements(), &fonts), None);
    }

    #[test]
    fn test_later_element_wins_overlap() {
        let fonts = FontBook::with_builtin_fonts();
        let mut model = AnnotationModel::new();
        model
            .add_element("Overlap", Vec2::new(100.0, 100.0), style(20.0))
            .unwrap();
        let b = model
            .add_element("Overlap", Vec2::new(104.0, 102.0), style(20.0))
            .unwrap()
            .id;

        assert_eq!(hit_test(Vec2::new(102.0, 101.0), model.elements(), &fonts), Some(b));
    }

    #[test]
    fn test_earlier_element_reachable_outside_overlap() {
        let fonts = FontBook::approximate();
        let mut model = AnnotationModel::new();
        // "abcd" at size 20 is 40 wide under approximate metrics
        let a = model
            .add_element("abcd", Vec2::new(100.0, 100.0), style(20.0))
            .unwrap()
            .id;
        model
            .add_element("abcd", Vec2::new(130.0, 100.0), style(20.0))
            .unwrap();

        assert_eq!(hit_test(Vec2::new(85.0, 100.0), model.elements(), &fonts), Some(a));
    }

    #[test]
    fn test_bounds_height_is_font_size() {
        let fonts = FontBook::approximate();
        let mut model = AnnotationModel::new();
        let element = model
            .add_element("ab", Vec2::new(50.0, 50.0), style(30.0))
            .unwrap()
            .clone();
        let bounds = element_bounds(&element, &fonts);
        assert_eq!(bounds.height(), 30.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.center(), Vec2::new(50.0, 50.0));

        assert!(point_in_element(Vec2::new(50.0, 35.0), &element, &fonts));
        assert!(!point_in_element(Vec2::new(50.0, 34.0), &element, &fonts));
    }
}
