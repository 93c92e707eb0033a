// src/domain/errors.rs
use thiserror::Error;

use crate::domain::slug::value_objects::{FieldName, RecordId, SchemaName};

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures reported by store adapters.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type SlugResult<T> = Result<T, SlugError>;

/// Failures of slug computation, annotated with the field (and record, when
/// it already has an identity) that triggered them.
#[derive(Debug, Error)]
pub enum SlugError {
    #[error("slug field `{field}` (record {}) normalized to an empty value", display_record(.record))]
    EmptySlug {
        field: FieldName,
        record: Option<RecordId>,
    },

    #[error(
        "slug field `{field}` (record {}) gave up on base `{base}` after {attempts} attempts",
        display_record(.record)
    )]
    Exhausted {
        field: FieldName,
        record: Option<RecordId>,
        base: String,
        attempts: u32,
    },

    #[error("slug lookup for field `{field}` (record {}) failed", display_record(.record))]
    Store {
        field: FieldName,
        record: Option<RecordId>,
        #[source]
        source: DomainError,
    },

    #[error("slug for field `{field}` (record {}) was taken concurrently", display_record(.record))]
    Collision {
        field: FieldName,
        record: Option<RecordId>,
        #[source]
        source: DomainError,
    },

    #[error("schema `{0}` has no registered slug fields")]
    UnknownSchema(SchemaName),

    #[error("invalid slug field configuration: {0}")]
    InvalidConfig(String),
}

impl SlugError {
    /// Only a lost race against a concurrent writer is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SlugError::Collision { .. })
    }

    pub fn record(&self) -> Option<RecordId> {
        match self {
            SlugError::EmptySlug { record, .. }
            | SlugError::Exhausted { record, .. }
            | SlugError::Store { record, .. }
            | SlugError::Collision { record, .. } => *record,
            SlugError::UnknownSchema(_) | SlugError::InvalidConfig(_) => None,
        }
    }

    pub fn field(&self) -> Option<&FieldName> {
        match self {
            SlugError::EmptySlug { field, .. }
            | SlugError::Exhausted { field, .. }
            | SlugError::Store { field, .. }
            | SlugError::Collision { field, .. } => Some(field),
            SlugError::UnknownSchema(_) | SlugError::InvalidConfig(_) => None,
        }
    }
}

fn display_record(record: &Option<RecordId>) -> String {
    match record {
        Some(id) => id.to_string(),
        None => "<new>".into(),
    }
}
