//! Record collaborators: the key-value store, the template library and the
//! agreement signature slots.
//!
//! ## Module Structure
//!
//! - [`store`] - RecordStore trait with JSON-file and in-memory backends
//! - [`templates`] - TemplateLibrary over the `image_templates` key
//! - [`agreements`] - Signature slots on `agreements` records

mod agreements;
mod error;
mod store;
mod templates;

#[cfg(test)]
mod tests;

pub use agreements::{AgreementSummary, SignatureSlot, attach_signature, list_agreements};
pub use error::{RecordError, RecordResult};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use templates::{TemplateLibrary, TemplateSummary};
