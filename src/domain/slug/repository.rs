use crate::domain::errors::DomainResult;
use crate::domain::slug::config::CollectionView;
use crate::domain::slug::record::Document;
use crate::domain::slug::value_objects::{FieldName, RecordId, SchemaName};
use async_trait::async_trait;

/// A single existence check issued while resolving a slug.
#[derive(Debug, Clone, Copy)]
pub struct SlugQuery<'a> {
    pub schema: &'a SchemaName,
    pub field: &'a FieldName,
    pub candidate: &'a str,
    pub view: &'a CollectionView,
    /// The record being saved; it never collides with itself.
    pub exclude: Option<RecordId>,
}

#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_taken(&self, query: SlugQuery<'_>) -> DomainResult<bool>;
}

#[async_trait]
pub trait DocumentWriteRepository: Send + Sync {
    /// Inserts (no id) or replaces (id set) a document. Values of
    /// `unique_fields` must be unique per schema; a duplicate is reported as
    /// `DomainError::Conflict`.
    async fn persist(
        &self,
        schema: &SchemaName,
        unique_fields: &[FieldName],
        document: &Document,
    ) -> DomainResult<Document>;

    async fn delete(&self, schema: &SchemaName, id: RecordId) -> DomainResult<()>;
}

#[async_trait]
pub trait DocumentReadRepository: Send + Sync {
    async fn find_by_id(&self, schema: &SchemaName, id: RecordId)
    -> DomainResult<Option<Document>>;

    async fn find_by_slug(
        &self,
        schema: &SchemaName,
        field: &FieldName,
        slug: &str,
    ) -> DomainResult<Option<Document>>;
}
