// src/application/commands/documents/save.rs
use super::DocumentCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        errors::{DomainError, SlugError},
        slug::{Document, FieldName, SchemaName},
    },
};

pub struct SaveDocumentCommand {
    pub schema: String,
    pub document: Document,
}

impl SaveDocumentCommand {
    pub fn new(schema: impl Into<String>, document: Document) -> Self {
        Self {
            schema: schema.into(),
            document,
        }
    }
}

impl DocumentCommandService {
    /// Runs the slug hooks of the document's schema and persists it.
    ///
    /// If the store rejects the write because a freshly resolved slug was
    /// claimed concurrently, the hooks run again against the updated store,
    /// at most `max_retries` extra times. The caller's document is never
    /// partially updated: slugs are only visible in the returned value.
    pub async fn save_document(&self, command: SaveDocumentCommand) -> ApplicationResult<Document> {
        let schema = SchemaName::new(command.schema)?;
        let unique_fields = self.registry.slug_fields(&schema)?;
        let original = command.document;

        let mut retries = 0;
        loop {
            let mut staged = original.clone();
            let recomputed = self.registry.pre_save(&schema, &mut staged).await?;

            match self
                .write_repo
                .persist(&schema, &unique_fields, &staged)
                .await
            {
                Ok(saved) => return Ok(saved),
                Err(DomainError::Conflict(message)) if !recomputed.is_empty() => {
                    let field = conflicting_field(&recomputed, &message);
                    if retries >= self.max_retries {
                        tracing::warn!(
                            schema = %schema,
                            field = %field,
                            retries,
                            "giving up on slug after repeated collisions"
                        );
                        return Err(SlugError::Collision {
                            field,
                            record: original.id,
                            source: DomainError::Conflict(message),
                        }
                        .into());
                    }
                    retries += 1;
                    tracing::warn!(
                        schema = %schema,
                        field = %field,
                        retry = retries,
                        "slug claimed concurrently, recomputing"
                    );
                }
                Err(err) => return Err(ApplicationError::from(err)),
            }
        }
    }
}

fn conflicting_field(recomputed: &[FieldName], message: &str) -> FieldName {
    recomputed
        .iter()
        .find(|field| message.contains(&format!("`{field}`")))
        .unwrap_or(&recomputed[0])
        .clone()
}
