pub mod config;
pub mod record;
pub mod registry;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use config::{
    CollectionView, EmptySlugPolicy, FilterValue, NormalizerOptions, SlugFieldConfig,
    SlugFieldConfigBuilder,
};
pub use record::{Document, SlugTarget};
pub use registry::SlugRegistry;
pub use repository::{DocumentReadRepository, DocumentWriteRepository, SlugLookup, SlugQuery};
pub use services::{SlugLifecycleController, SlugProbe, UniqueSlugResolver};
pub use value_objects::{FieldName, RecordId, SchemaName, Slug, SlugCandidate};
