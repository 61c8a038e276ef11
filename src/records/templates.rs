//! Template library backed by a record store.

use serde_json::Value;

use super::error::{RecordError, RecordResult};
use super::store::RecordStore;
use crate::canvas::{ImageTemplate, TemplateId, TemplateMeta};
use crate::constants::IMAGE_TEMPLATES_KEY;

/// Row shown in the template list.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub element_count: usize,
    pub has_image: bool,
}

/// In-memory view of the stored templates. Every mutation is written through
/// to the store; the in-memory list only changes once the write succeeded.
pub struct TemplateLibrary {
    store: Box<dyn RecordStore>,
    templates: Vec<ImageTemplate>,
    /// Records that did not parse, written back untouched on every commit
    unreadable: Vec<Value>,
}

impl TemplateLibrary {
    /// Load every template record. Records that do not parse are hidden from
    /// the library but kept in the store.
    pub fn open(store: Box<dyn RecordStore>) -> RecordResult<Self> {
        let mut templates = Vec::new();
        let mut unreadable = Vec::new();
        for value in store.load(IMAGE_TEMPLATES_KEY)? {
            match serde_json::from_value::<ImageTemplate>(value.clone()) {
                Ok(template) => templates.push(template),
                Err(e) => {
                    tracing::warn!("Skipping unreadable template record: {}", e);
                    unreadable.push(value);
                }
            }
        }

        tracing::info!(
            "Loaded {} templates ({} unreadable)",
            templates.len(),
            unreadable.len()
        );
        Ok(Self {
            store,
            templates,
            unreadable,
        })
    }

    /// An empty library that writes to `store` without reading it first.
    pub fn empty(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            templates: Vec::new(),
            unreadable: Vec::new(),
        }
    }

    pub fn templates(&self) -> &[ImageTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: TemplateId) -> Option<&ImageTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates
            .iter()
            .map(|t| TemplateSummary {
                id: t.id,
                name: t.name.clone(),
                category: t.category.clone(),
                description: t.description.clone(),
                element_count: t.element_count(),
                has_image: t.has_image(),
            })
            .collect()
    }

    pub fn insert(&mut self, template: ImageTemplate) -> RecordResult<TemplateId> {
        let id = template.id;
        let mut next = self.templates.clone();
        next.push(template);
        self.commit(next)?;
        Ok(id)
    }

    /// Add a metadata-only template with no raster and no elements.
    pub fn create_stub(&mut self, meta: &TemplateMeta) -> RecordResult<TemplateId> {
        let stub = ImageTemplate::stub(meta)?;
        self.insert(stub)
    }

    pub fn update_meta(&mut self, id: TemplateId, meta: &TemplateMeta) -> RecordResult<()> {
        let mut next = self.templates.clone();
        let template = next
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RecordError::not_found("template", id))?;
        template.set_meta(meta)?;
        self.commit(next)
    }

    /// Remove a template. Deleting an unknown id is a no-op returning `false`.
    pub fn delete(&mut self, id: TemplateId) -> RecordResult<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next = self
            .templates
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    fn commit(&mut self, next: Vec<ImageTemplate>) -> RecordResult<()> {
        let mut records = next
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|source| RecordError::Serialize {
                key: IMAGE_TEMPLATES_KEY.to_string(),
                source,
            })?;
        records.extend(self.unreadable.iter().cloned());
        self.store.save(IMAGE_TEMPLATES_KEY, &records)?;
        self.templates = next;
        Ok(())
    }
}
