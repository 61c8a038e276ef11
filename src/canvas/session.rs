//! The editor session: one owned object holding the background, the
//! annotations, the selection and the drag state.
//!
//! Commands work on a copy of the model and report what happened. The new
//! preview frame is rendered from that copy before anything is swapped in, so
//! a failing command leaves the session as it was. Export renders a separate
//! frame without touching the preview.

use bevy::math::{UVec2, Vec2};
use image::RgbaImage;
use tiny_skia::Pixmap;

use super::controller::{DragController, PointerOutcome};
use super::element::{ElementId, ElementPatch, TextElement, TextStyle};
use super::error::{CanvasError, CanvasResult, ValidationError};
use super::export::{decode_image_data_uri, encode_data_uri, encode_png, pixmap_to_image};
use super::fonts::FontBook;
use super::geometry::device_to_logical;
use super::model::AnnotationModel;
use super::rendering::{Background, RenderOptions, render_surface};
use super::template::{CUSTOM_CATEGORY, ImageTemplate, SAVED_FROM_EDITOR, TemplateId, TemplateMeta};
use crate::common::{CursorHint, PointerEvent, SurfaceGeometry};

/// Pending text input and the style new elements are created with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub text: String,
    pub style: TextStyle,
}

impl Draft {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Result of applying a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateApplied {
    Ready,
    /// The template carries no raster; an image must be uploaded
    NeedsImage,
}

pub struct EditorSession {
    fonts: FontBook,
    max_surface: UVec2,
    background: Option<Background>,
    surface_size: UVec2,
    model: AnnotationModel,
    controller: DragController,
    pub draft: Draft,
    frame: Option<Pixmap>,
    /// Bumped on every re-render so views know when to refresh
    revision: u64,
}

impl EditorSession {
    pub fn new(fonts: FontBook, max_surface: UVec2) -> Self {
        Self {
            fonts,
            max_surface,
            background: None,
            surface_size: max_surface,
            model: AnnotationModel::new(),
            controller: DragController::default(),
            draft: Draft::default(),
            frame: None,
            revision: 0,
        }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn model(&self) -> &AnnotationModel {
        &self.model
    }

    pub fn elements(&self) -> &[TextElement] {
        self.model.elements()
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.model.selected_id()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    pub fn surface_size(&self) -> UVec2 {
        self.surface_size
    }

    pub fn max_surface(&self) -> UVec2 {
        self.max_surface
    }

    pub fn frame(&self) -> Option<&Pixmap> {
        self.frame.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Install a decoded raster as the background, fitted to the surface bounds.
    ///
    /// Replacing an existing background resets the overlay. When no background
    /// was set yet (e.g. after applying a text-only template) the elements are
    /// kept.
    pub fn set_background(&mut self, image: RgbaImage) -> CanvasResult<()> {
        let background = Background::fit(image, self.max_surface)?;
        let model = if self.background.is_some() {
            AnnotationModel::new()
        } else {
            self.model.clone()
        };
        let size = background.size();
        let frame = self.compose(size, Some(&background), &model)?;

        self.surface_size = size;
        self.background = Some(background);
        self.model = model;
        self.controller.reset();
        self.install(frame);
        tracing::info!(
            "Background set, surface is {}x{}",
            self.surface_size.x,
            self.surface_size.y
        );
        Ok(())
    }

    pub fn add_element(&mut self, text: &str, position: Vec2, style: TextStyle) -> CanvasResult<ElementId> {
        let mut model = self.model.clone();
        let id = model.add_element(text, position, style)?.id;
        self.commit(model)?;
        tracing::debug!("Added element {} at ({}, {})", id, position.x, position.y);
        Ok(id)
    }

    /// Place the draft text at the surface center and clear the draft text.
    pub fn add_element_at_center(&mut self) -> CanvasResult<ElementId> {
        let center = self.surface_size.as_vec2() / 2.0;
        self.place_draft(center)
    }

    fn place_draft(&mut self, position: Vec2) -> CanvasResult<ElementId> {
        let text = self.draft.text.clone();
        let style = self.draft.style.clone();
        let id = self.add_element(&text, position, style)?;
        self.draft.text.clear();
        Ok(id)
    }

    /// Merge a patch into an element. `Ok(false)` when the id is unknown.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> CanvasResult<bool> {
        let mut model = self.model.clone();
        let updated = model.update_element(id, patch)?;
        if updated {
            self.commit(model)?;
        }
        Ok(updated)
    }

    /// Load an element's text and style into the draft and select it.
    pub fn edit_element(&mut self, id: ElementId) -> CanvasResult<()> {
        let element = self.model.get(id).ok_or(CanvasError::ElementNotFound(id))?;
        self.draft = Draft {
            text: element.text.clone(),
            style: element.style.clone(),
        };
        self.select(Some(id))
    }

    /// Push the draft into the selected element.
    pub fn apply_draft_to_selected(&mut self) -> CanvasResult<ElementId> {
        let id = self
            .model
            .selected_id()
            .ok_or(ValidationError::NoSelection)?;
        let patch = ElementPatch::from_draft(&self.draft.text, &self.draft.style);
        if !self.update_element(id, &patch)? {
            return Err(CanvasError::ElementNotFound(id));
        }
        Ok(id)
    }

    pub fn remove_element(&mut self, id: ElementId) -> CanvasResult<bool> {
        let mut model = self.model.clone();
        let removed = model.remove_element(id);
        if removed {
            self.commit(model)?;
            tracing::debug!("Removed element {}", id);
        }
        Ok(removed)
    }

    pub fn clear_all(&mut self) -> CanvasResult<()> {
        self.commit(AnnotationModel::new())?;
        self.controller.reset();
        Ok(())
    }

    pub fn select(&mut self, id: Option<ElementId>) -> CanvasResult<()> {
        let mut model = self.model.clone();
        model.select(id);
        self.commit(model)
    }

    /// Route a pointer event from the editor surface through the drag controller.
    ///
    /// Events are ignored until a background is set.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        geometry: SurfaceGeometry,
    ) -> CanvasResult<PointerOutcome> {
        if self.background.is_none() {
            return Ok(PointerOutcome::Ignored);
        }

        let point = self.to_logical(event.position, geometry);
        let mut model = self.model.clone();
        let outcome = self
            .controller
            .handle(event.kind, point, &mut model, &self.fonts);

        if let PointerOutcome::PlaceRequested(at) = outcome
            && self.draft.has_text()
        {
            self.place_draft(at)?;
        } else if outcome.needs_render()
            && let Err(e) = self.commit(model)
        {
            self.controller.reset();
            return Err(e);
        }
        Ok(outcome)
    }

    pub fn cursor_hint(&self, device: Vec2, geometry: SurfaceGeometry) -> CursorHint {
        if self.background.is_none() {
            return CursorHint::None;
        }
        let point = self.to_logical(device, geometry);
        self.controller
            .cursor_hint(point, &self.model, &self.fonts, self.draft.has_text())
    }

    fn to_logical(&self, device: Vec2, geometry: SurfaceGeometry) -> Vec2 {
        device_to_logical(device, self.surface_size.as_vec2(), geometry.displayed_size)
    }

    /// Recomposite the preview frame (selection outline included).
    pub fn render(&mut self) -> CanvasResult<()> {
        let frame = self.compose(self.surface_size, self.background.as_ref(), &self.model)?;
        self.install(frame);
        Ok(())
    }

    /// Render `model` and swap it in. On error the current model stays.
    fn commit(&mut self, model: AnnotationModel) -> CanvasResult<()> {
        let frame = self.compose(self.surface_size, self.background.as_ref(), &model)?;
        self.model = model;
        self.install(frame);
        Ok(())
    }

    fn compose(
        &self,
        size: UVec2,
        background: Option<&Background>,
        model: &AnnotationModel,
    ) -> CanvasResult<Pixmap> {
        render_surface(size, background, model, &self.fonts, RenderOptions::default())
    }

    fn install(&mut self, frame: Pixmap) {
        self.frame = Some(frame);
        self.revision = self.revision.wrapping_add(1);
    }

    /// PNG snapshot of the composited surface without selection decoration.
    pub fn export_raster(&self) -> CanvasResult<Vec<u8>> {
        let pixmap = render_surface(
            self.surface_size,
            self.background.as_ref(),
            &self.model,
            &self.fonts,
            RenderOptions::export(),
        )?;
        encode_png(&pixmap_to_image(&pixmap))
    }

    pub fn export_data_uri(&self) -> CanvasResult<String> {
        Ok(encode_data_uri(&self.export_raster()?))
    }

    /// Snapshot the current image and annotations as a template with the
    /// editor's default category and description.
    pub fn save_as_template(&self, name: &str) -> CanvasResult<ImageTemplate> {
        self.save_as_template_with(&TemplateMeta {
            name: name.to_string(),
            category: CUSTOM_CATEGORY.to_string(),
            description: SAVED_FROM_EDITOR.to_string(),
        })
    }

    pub fn save_as_template_with(&self, meta: &TemplateMeta) -> CanvasResult<ImageTemplate> {
        let meta = meta.validated()?;
        if self.model.is_empty() {
            return Err(ValidationError::NoElements.into());
        }
        if self.background.is_none() {
            return Err(ValidationError::MissingBackground.into());
        }

        let image_data = self.export_data_uri()?;
        Ok(ImageTemplate {
            id: TemplateId::new(),
            name: meta.name,
            category: meta.category,
            description: meta.description,
            image_data,
            text_elements: self.model.snapshot(),
            created_at: chrono::Utc::now(),
        })
    }

    /// Replace the session state with a template's raster and elements.
    ///
    /// Elements are validated and the raster decoded before anything changes,
    /// so a corrupt template leaves the session untouched.
    pub fn apply_template(&mut self, template: &ImageTemplate) -> CanvasResult<TemplateApplied> {
        for element in &template.text_elements {
            element.validate()?;
        }
        let background = if template.has_image() {
            let image = decode_image_data_uri(&template.image_data)?;
            Some(Background::fit(image, self.max_surface)?)
        } else {
            None
        };

        let applied = if background.is_some() {
            TemplateApplied::Ready
        } else {
            TemplateApplied::NeedsImage
        };
        let size = background
            .as_ref()
            .map(Background::size)
            .unwrap_or(self.max_surface);
        let model = AnnotationModel::from_elements(template.text_elements.clone());
        let frame = self.compose(size, background.as_ref(), &model)?;

        self.surface_size = size;
        self.background = background;
        self.model = model;
        self.controller.reset();
        self.install(frame);
        tracing::info!(
            "Applied template {:?} ({} elements)",
            template.name,
            template.element_count()
        );
        Ok(applied)
    }
}
