//! Unique slug fields for stored documents.
//!
//! A slug field is declared once per schema with a [`SlugFieldConfig`]. On
//! every save the [`SlugRegistry`] decides whether the slug must be
//! (re)computed, normalizes the origin text and appends `-1`, `-2`, ... until
//! the value is free in the configured collection view.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{ApplicationError, ApplicationResult};
pub use config::{ConfigError, SlugSettings};
pub use domain::errors::{DomainError, DomainResult, SlugError, SlugResult};
pub use domain::slug::{
    CollectionView, Document, EmptySlugPolicy, FieldName, FilterValue, NormalizerOptions,
    RecordId, SchemaName, Slug, SlugFieldConfig, SlugRegistry, SlugTarget,
};
pub use infrastructure::util::normalize;
