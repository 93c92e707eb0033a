use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::slug::config::SlugFieldConfig;
use crate::domain::slug::record::SlugTarget;
use crate::domain::slug::repository::SlugLookup;
use crate::domain::slug::services::{SlugLifecycleController, UniqueSlugResolver};
use crate::domain::slug::value_objects::{FieldName, SchemaName};

/// Slug fields per schema, in declaration order.
///
/// Fields are registered once when a schema is declared; the save path only
/// reads from the registry afterwards.
pub struct SlugRegistry {
    generator: Arc<dyn SlugGenerator>,
    lookup: Arc<dyn SlugLookup>,
    resolver: UniqueSlugResolver,
    schemas: HashMap<SchemaName, Vec<SlugLifecycleController>>,
}

impl SlugRegistry {
    pub fn new(
        generator: Arc<dyn SlugGenerator>,
        lookup: Arc<dyn SlugLookup>,
        resolver: UniqueSlugResolver,
    ) -> Self {
        Self {
            generator,
            lookup,
            resolver,
            schemas: HashMap::new(),
        }
    }

    pub fn register(&mut self, schema: SchemaName, config: SlugFieldConfig) -> SlugResult<()> {
        let controllers = self.schemas.entry(schema.clone()).or_default();
        if controllers.iter().any(|c| c.field() == config.field()) {
            return Err(SlugError::InvalidConfig(format!(
                "slug field `{}` is already registered on `{schema}`",
                config.field()
            )));
        }

        tracing::debug!(schema = %schema, field = %config.field(), "registered slug field");
        controllers.push(SlugLifecycleController::new(
            schema,
            config,
            Arc::clone(&self.generator),
            Arc::clone(&self.lookup),
            self.resolver,
        ));
        Ok(())
    }

    pub fn controllers(&self, schema: &SchemaName) -> SlugResult<&[SlugLifecycleController]> {
        self.schemas
            .get(schema)
            .map(Vec::as_slice)
            .ok_or_else(|| SlugError::UnknownSchema(schema.clone()))
    }

    /// Fields the store must keep unique for `schema`.
    pub fn slug_fields(&self, schema: &SchemaName) -> SlugResult<Vec<FieldName>> {
        Ok(self
            .controllers(schema)?
            .iter()
            .map(|c| c.field().clone())
            .collect())
    }

    /// Runs every slug hook of `schema` against `record`. All slugs are
    /// resolved before any is assigned, so a failure leaves the record as it
    /// was. Returns the fields that were recomputed.
    pub async fn pre_save<R>(&self, schema: &SchemaName, record: &mut R) -> SlugResult<Vec<FieldName>>
    where
        R: SlugTarget + Send + Sync + ?Sized,
    {
        let controllers = self.controllers(schema)?;

        let mut planned = Vec::with_capacity(controllers.len());
        for controller in controllers {
            if let Some(slug) = controller.plan(&*record).await? {
                planned.push((controller.field().clone(), slug));
            }
        }

        let mut changed = Vec::with_capacity(planned.len());
        for (field, slug) in planned {
            tracing::info!(schema = %schema, field = %field, slug = %slug, "assigned slug");
            record.assign(&field, slug);
            changed.push(field);
        }
        Ok(changed)
    }
}
