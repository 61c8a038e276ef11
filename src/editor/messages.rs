//! Message types for editor commands issued by the UI.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::canvas::{TemplateId, TemplateMeta};
use crate::records::SignatureSlot;

/// Ask the user for a background image (async file picker)
#[derive(Message)]
pub struct OpenImageRequest;

/// Decode an image file and install it as the background
#[derive(Message)]
pub struct LoadImageRequest {
    pub path: PathBuf,
}

/// Save the composited image to a user-chosen file
#[derive(Message)]
pub struct ExportImageRequest;

/// Write the composited image to the exports folder and open it for printing
#[derive(Message)]
pub struct PrintImageRequest;

#[derive(Message)]
pub struct SaveTemplateRequest {
    pub name: String,
}

#[derive(Message)]
pub struct ApplyTemplateRequest {
    pub id: TemplateId,
}

/// Add a metadata-only template
#[derive(Message)]
pub struct CreateTemplateStubRequest {
    pub meta: TemplateMeta,
}

#[derive(Message)]
pub struct UpdateTemplateMetaRequest {
    pub id: TemplateId,
    pub meta: TemplateMeta,
}

#[derive(Message)]
pub struct DeleteTemplateRequest {
    pub id: TemplateId,
}

/// Open the signature pad for one slot of an agreement
#[derive(Message)]
pub struct OpenSignatureRequest {
    pub agreement_id: String,
    pub slot: SignatureSlot,
}

/// Store the pad's ink into the open signing target
#[derive(Message)]
pub struct SaveSignatureRequest;
