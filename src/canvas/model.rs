//! Ordered collection of text elements plus the current selection.
//!
//! Insertion order is paint order. Hit-testing walks the sequence backwards so
//! the most recently added element wins where elements overlap.

use bevy::math::Vec2;

use super::element::{ElementId, ElementPatch, TextElement, TextStyle};
use super::error::ValidationError;

#[derive(Debug, Clone, Default)]
pub struct AnnotationModel {
    elements: Vec<TextElement>,
    selected: Option<ElementId>,
}

impl AnnotationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from an existing sequence (e.g. a template), selection cleared.
    pub fn from_elements(elements: Vec<TextElement>) -> Self {
        Self {
            elements,
            selected: None,
        }
    }

    /// Append a new element. Text is trimmed and must not end up empty.
    pub fn add_element(
        &mut self,
        text: &str,
        position: Vec2,
        style: TextStyle,
    ) -> Result<&TextElement, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        style.validate()?;

        self.elements.push(TextElement {
            id: ElementId::new(),
            text: text.to_string(),
            position,
            style,
        });
        Ok(&self.elements[self.elements.len() - 1])
    }

    /// Merge a patch into the element with `id`.
    ///
    /// Returns `Ok(false)` when no such element exists (nothing changes).
    pub fn update_element(
        &mut self,
        id: ElementId,
        patch: &ElementPatch,
    ) -> Result<bool, ValidationError> {
        patch.validate()?;
        match self.get_mut(id) {
            Some(element) => {
                patch.apply_to(element);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the element with `id`, clearing the selection if it pointed at it.
    /// Returns whether an element was removed.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.elements.len() != before
    }

    pub fn clear_all(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Set or clear the selection. Selecting an unknown id clears it.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id.filter(|id| self.contains(*id));
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&TextElement> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&TextElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut TextElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    /// Deep copy of the sequence, independent of this model's lifetime.
    pub fn snapshot(&self) -> Vec<TextElement> {
        self.elements.clone()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
