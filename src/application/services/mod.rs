// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::documents::DocumentCommandService, queries::documents::DocumentQueryService,
    },
    domain::slug::{DocumentReadRepository, DocumentWriteRepository, SlugRegistry},
};

/// Wires the registry and a store into the command and query services.
pub struct ApplicationServices {
    pub document_commands: Arc<DocumentCommandService>,
    pub document_queries: Arc<DocumentQueryService>,
    registry: Arc<SlugRegistry>,
}

impl ApplicationServices {
    pub fn new(
        registry: SlugRegistry,
        write_repo: Arc<dyn DocumentWriteRepository>,
        read_repo: Arc<dyn DocumentReadRepository>,
        save_max_retries: u32,
    ) -> Self {
        let registry = Arc::new(registry);

        let document_commands = Arc::new(
            DocumentCommandService::new(Arc::clone(&registry), Arc::clone(&write_repo))
                .with_max_retries(save_max_retries),
        );
        let document_queries = Arc::new(DocumentQueryService::new(Arc::clone(&read_repo)));

        Self {
            document_commands,
            document_queries,
            registry,
        }
    }

    pub fn registry(&self) -> &SlugRegistry {
        &self.registry
    }
}
