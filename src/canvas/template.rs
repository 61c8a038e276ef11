//! Reusable snapshots of a background raster plus its annotations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::element::TextElement;
use super::error::ValidationError;

/// Category given to templates saved from the editor.
pub const CUSTOM_CATEGORY: &str = "Custom";
pub const SAVED_FROM_EDITOR: &str = "Saved from the image editor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display metadata editable without touching the raster or elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateMeta {
    pub name: String,
    pub category: String,
    pub description: String,
}

impl TemplateMeta {
    /// Trimmed copy; the name must not be empty.
    pub fn validated(&self) -> Result<TemplateMeta, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTemplateName);
        }
        Ok(TemplateMeta {
            name: name.to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// PNG data URI of the composited surface; empty for text-only stubs
    #[serde(default)]
    pub image_data: String,
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
    pub created_at: DateTime<Utc>,
}

impl ImageTemplate {
    /// Metadata-only template with no raster and no elements.
    pub fn stub(meta: &TemplateMeta) -> Result<Self, ValidationError> {
        let meta = meta.validated()?;
        Ok(Self {
            id: TemplateId::new(),
            name: meta.name,
            category: meta.category,
            description: meta.description,
            image_data: String::new(),
            text_elements: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn has_image(&self) -> bool {
        !self.image_data.trim().is_empty()
    }

    pub fn element_count(&self) -> usize {
        self.text_elements.len()
    }

    pub fn meta(&self) -> TemplateMeta {
        TemplateMeta {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }

    pub fn set_meta(&mut self, meta: &TemplateMeta) -> Result<(), ValidationError> {
        let meta = meta.validated()?;
        self.name = meta.name;
        self.category = meta.category;
        self.description = meta.description;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> TemplateMeta {
        TemplateMeta {
            name: name.to_string(),
            category: " Contracts ".to_string(),
            description: "Blank lease".to_string(),
        }
    }

    #[test]
    fn test_stub_has_no_image() {
        let stub = ImageTemplate::stub(&meta("Lease")).unwrap();
        assert!(!stub.has_image());
        assert_eq!(stub.element_count(), 0);
        assert_eq!(stub.category, "Contracts");
    }

    #[test]
    fn test_stub_requires_name() {
        assert_eq!(
            ImageTemplate::stub(&meta("   ")),
            Err(ValidationError::EmptyTemplateName)
        );
    }

    #[test]
    fn test_set_meta_keeps_content() {
        let mut template = ImageTemplate::stub(&meta("Lease")).unwrap();
        template.image_data = "data:image/png;base64,AAAA".to_string();
        template.set_meta(&meta("Lease v2")).unwrap();
        assert_eq!(template.name, "Lease v2");
        assert!(template.has_image());
    }

    #[test]
    fn test_serialized_field_names() {
        let template = ImageTemplate::stub(&meta("Lease")).unwrap();
        let value = serde_json::to_value(&template).unwrap();
        assert!(value.get("imageData").is_some());
        assert!(value.get("textElements").is_some());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "name": "Old record",
            "createdAt": "2024-05-01T10:00:00Z",
        });
        let template: ImageTemplate = serde_json::from_value(json).unwrap();
        assert!(!template.has_image());
        assert!(template.text_elements.is_empty());
    }
}
