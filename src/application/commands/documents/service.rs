// src/application/commands/documents/service.rs
use std::sync::Arc;

use crate::domain::slug::{DocumentWriteRepository, SlugRegistry};

/// Default number of times a save is retried after losing a slug race.
pub const DEFAULT_SAVE_MAX_RETRIES: u32 = 3;

pub struct DocumentCommandService {
    pub(super) registry: Arc<SlugRegistry>,
    pub(super) write_repo: Arc<dyn DocumentWriteRepository>,
    pub(super) max_retries: u32,
}

impl DocumentCommandService {
    pub fn new(registry: Arc<SlugRegistry>, write_repo: Arc<dyn DocumentWriteRepository>) -> Self {
        Self {
            registry,
            write_repo,
            max_retries: DEFAULT_SAVE_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}
