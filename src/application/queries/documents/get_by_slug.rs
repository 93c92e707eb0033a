use super::DocumentQueryService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::slug::{Document, FieldName, SchemaName},
};

pub struct GetDocumentBySlugQuery {
    pub schema: String,
    pub field: String,
    pub slug: String,
}

impl DocumentQueryService {
    pub async fn get_document_by_slug(&self, query: GetDocumentBySlugQuery) -> ApplicationResult<Document> {
        let schema = SchemaName::new(query.schema)?;
        let field = FieldName::new(query.field)?;
        if query.slug.trim().is_empty() {
            return Err(ApplicationError::validation("slug cannot be empty"));
        }

        self.read_repo
            .find_by_slug(&schema, &field, &query.slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("document not found"))
    }
}
