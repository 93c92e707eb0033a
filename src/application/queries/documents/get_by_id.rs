use super::DocumentQueryService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::slug::{Document, RecordId, SchemaName},
};

pub struct GetDocumentByIdQuery {
    pub schema: String,
    pub id: i64,
}

impl DocumentQueryService {
    pub async fn get_document_by_id(&self, query: GetDocumentByIdQuery) -> ApplicationResult<Document> {
        let schema = SchemaName::new(query.schema)?;
        let id = RecordId::new(query.id)?;
        self.read_repo
            .find_by_id(&schema, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("document not found"))
    }
}
