// tests/support/builders.rs
use mokkan_slugfield::{FieldName, SchemaName, SlugFieldConfig, SlugRegistry};
use mokkan_slugfield::domain::slug::SlugFieldConfigBuilder;

pub fn field(name: &str) -> FieldName {
    FieldName::new(name).unwrap()
}

pub fn schema(name: &str) -> SchemaName {
    SchemaName::new(name).unwrap()
}

/// `slug_field` populated from `origin`.
pub fn slug_from(slug_field: &str, origin: &str) -> SlugFieldConfigBuilder {
    SlugFieldConfig::builder(field(slug_field)).origin(field(origin))
}

pub fn declare(registry: &mut SlugRegistry, schema_name: &str, config: SlugFieldConfigBuilder) {
    registry
        .register(schema(schema_name), config.build().unwrap())
        .unwrap();
}
