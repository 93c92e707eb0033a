// src/application/commands/documents/mod.rs
mod delete;
mod save;
mod service;

pub use delete::DeleteDocumentCommand;
pub use save::SaveDocumentCommand;
pub use service::{DEFAULT_SAVE_MAX_RETRIES, DocumentCommandService};
