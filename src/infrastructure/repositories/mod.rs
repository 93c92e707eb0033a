// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod sqlite_document;

pub use error::{map_json, map_slug_write, map_sqlx, slug_conflict};
pub use memory::InMemoryDocumentStore;
pub use sqlite_document::SqliteDocumentStore;
