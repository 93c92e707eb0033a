// tests/support/helpers.rs
use std::sync::Arc;

use mokkan_slugfield::application::commands::documents::SaveDocumentCommand;
use mokkan_slugfield::application::services::ApplicationServices;
use mokkan_slugfield::domain::slug::{SlugLookup, UniqueSlugResolver};
use mokkan_slugfield::infrastructure::repositories::{InMemoryDocumentStore, SqliteDocumentStore};
use mokkan_slugfield::infrastructure::{database, util::DefaultSlugGenerator};
use mokkan_slugfield::{ApplicationResult, Document, SlugRegistry};

use super::mocks::fixed_clock;

pub struct MemoryHarness {
    pub services: ApplicationServices,
    pub store: Arc<InMemoryDocumentStore>,
}

impl MemoryHarness {
    pub async fn save(&self, schema: &str, document: Document) -> ApplicationResult<Document> {
        save(&self.services, schema, document).await
    }
}

pub async fn save(
    services: &ApplicationServices,
    schema: &str,
    document: Document,
) -> ApplicationResult<Document> {
    services
        .document_commands
        .save_document(SaveDocumentCommand::new(schema, document))
        .await
}

pub fn registry(lookup: Arc<dyn SlugLookup>) -> SlugRegistry {
    SlugRegistry::new(
        Arc::new(DefaultSlugGenerator),
        lookup,
        UniqueSlugResolver::default(),
    )
}

pub fn memory_harness(declare: impl FnOnce(&mut SlugRegistry)) -> MemoryHarness {
    memory_harness_with(|store| store, 3, declare)
}

/// Like [`memory_harness`], but slug checks go through `wrap(store)` while
/// writes still hit the store directly.
pub fn memory_harness_with(
    wrap: impl FnOnce(Arc<dyn SlugLookup>) -> Arc<dyn SlugLookup>,
    save_max_retries: u32,
    declare: impl FnOnce(&mut SlugRegistry),
) -> MemoryHarness {
    let store = Arc::new(InMemoryDocumentStore::new(fixed_clock()));
    let lookup: Arc<dyn SlugLookup> = store.clone();
    let mut registry = registry(wrap(lookup));
    declare(&mut registry);

    let services = ApplicationServices::new(registry, store.clone(), store.clone(), save_max_retries);
    MemoryHarness { services, store }
}

pub struct SqliteHarness {
    pub services: ApplicationServices,
    pub store: Arc<SqliteDocumentStore>,
}

impl SqliteHarness {
    pub async fn save(&self, schema: &str, document: Document) -> ApplicationResult<Document> {
        save(&self.services, schema, document).await
    }
}

pub async fn sqlite_harness(declare: impl FnOnce(&mut SlugRegistry)) -> SqliteHarness {
    let pool = database::init_pool("sqlite::memory:", 1)
        .await
        .expect("open in-memory sqlite");
    database::run_migrations(&pool).await.expect("migrations");

    let store = Arc::new(SqliteDocumentStore::new(Arc::new(pool), fixed_clock()));
    let mut registry = registry(store.clone());
    declare(&mut registry);

    let services = ApplicationServices::new(registry, store.clone(), store.clone(), 3);
    SqliteHarness { services, store }
}
