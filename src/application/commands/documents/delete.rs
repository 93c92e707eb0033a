// src/application/commands/documents/delete.rs
use super::DocumentCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::slug::{RecordId, SchemaName},
};

pub struct DeleteDocumentCommand {
    pub schema: String,
    pub id: i64,
}

impl DocumentCommandService {
    /// Removing a document frees its slugs for later resolutions.
    pub async fn delete_document(&self, command: DeleteDocumentCommand) -> ApplicationResult<()> {
        let schema = SchemaName::new(command.schema)?;
        let id = RecordId::new(command.id)?;
        self.write_repo.delete(&schema, id).await?;
        tracing::debug!(schema = %schema, id = %id, "deleted document");
        Ok(())
    }
}
