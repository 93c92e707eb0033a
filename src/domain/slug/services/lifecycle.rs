use std::sync::Arc;

use async_trait::async_trait;

use super::resolver::{ResolveError, SlugProbe, UniqueSlugResolver};
use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainResult, SlugError, SlugResult};
use crate::domain::slug::config::{CollectionView, EmptySlugPolicy, SlugFieldConfig};
use crate::domain::slug::record::SlugTarget;
use crate::domain::slug::repository::{SlugLookup, SlugQuery};
use crate::domain::slug::value_objects::{
    FieldName, RecordId, SchemaName, Slug, SlugCandidate,
};

/// Pre-save hook for one slug field of one schema.
///
/// Recomputes the slug on a record's first save, or on every save when the
/// field is configured with `force_recompute`. Otherwise the stored slug is
/// left alone even if its origin text changed, so published links stay valid.
pub struct SlugLifecycleController {
    schema: SchemaName,
    config: SlugFieldConfig,
    generator: Arc<dyn SlugGenerator>,
    lookup: Arc<dyn SlugLookup>,
    resolver: UniqueSlugResolver,
}

impl SlugLifecycleController {
    pub fn new(
        schema: SchemaName,
        config: SlugFieldConfig,
        generator: Arc<dyn SlugGenerator>,
        lookup: Arc<dyn SlugLookup>,
        resolver: UniqueSlugResolver,
    ) -> Self {
        Self {
            schema,
            config,
            generator,
            lookup,
            resolver,
        }
    }

    pub fn schema(&self) -> &SchemaName {
        &self.schema
    }

    pub fn config(&self) -> &SlugFieldConfig {
        &self.config
    }

    pub fn field(&self) -> &FieldName {
        self.config.field()
    }

    pub fn needs_recompute<R>(&self, record: &R) -> bool
    where
        R: SlugTarget + ?Sized,
    {
        record.record_id().is_none() || self.config.force_recompute()
    }

    /// Computes the slug this save should assign, without touching the record.
    /// `None` means the current value stays.
    pub async fn plan<R>(&self, record: &R) -> SlugResult<Option<Slug>>
    where
        R: SlugTarget + Sync + ?Sized,
    {
        if !self.needs_recompute(record) {
            return Ok(None);
        }

        let record_id = record.record_id();
        let source = record
            .text_value(self.config.origin())
            .unwrap_or_default();
        let start = self.starting_candidate(&source, record_id)?;

        let probe = ScopedProbe {
            lookup: self.lookup.as_ref(),
            query_schema: &self.schema,
            field: self.config.field(),
            view: self.config.view(),
            exclude: record_id,
        };

        let resolved = self
            .resolver
            .resolve_from(start, &probe)
            .await
            .map_err(|err| match err {
                ResolveError::Exhausted { base, attempts } => SlugError::Exhausted {
                    field: self.config.field().clone(),
                    record: record_id,
                    base,
                    attempts,
                },
                ResolveError::Store(source) => SlugError::Store {
                    field: self.config.field().clone(),
                    record: record_id,
                    source,
                },
            })?;

        Ok(Some(Slug::from_resolved(resolved)))
    }

    /// Runs the hook: assigns a freshly resolved slug when one is due.
    /// Returns whether the record was changed.
    pub async fn on_pre_save<R>(&self, record: &mut R) -> SlugResult<bool>
    where
        R: SlugTarget + Send + Sync + ?Sized,
    {
        match self.plan(&*record).await? {
            Some(slug) => {
                tracing::info!(
                    schema = %self.schema,
                    field = %self.config.field(),
                    slug = %slug,
                    "assigned slug"
                );
                record.assign(self.config.field(), slug);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn starting_candidate(
        &self,
        source: &str,
        record: Option<RecordId>,
    ) -> SlugResult<SlugCandidate> {
        let base = self.normalize(source);
        if !base.is_empty() {
            return Ok(SlugCandidate::new(base));
        }

        let empty = || SlugError::EmptySlug {
            field: self.config.field().clone(),
            record,
        };
        match self.config.empty_policy() {
            EmptySlugPolicy::Reject => Err(empty()),
            EmptySlugPolicy::Fallback(fallback) => {
                let base = self.normalize(fallback);
                if base.is_empty() {
                    return Err(empty());
                }
                Ok(SlugCandidate::new(base))
            }
            EmptySlugPolicy::CounterOnly => Ok(SlugCandidate::suffixed("")),
        }
    }

    fn normalize(&self, text: &str) -> String {
        self.generator.slugify(
            text,
            self.config.preserve_unicode(),
            self.config.normalizer(),
        )
    }
}

struct ScopedProbe<'a> {
    lookup: &'a dyn SlugLookup,
    query_schema: &'a SchemaName,
    field: &'a FieldName,
    view: &'a CollectionView,
    exclude: Option<RecordId>,
}

#[async_trait]
impl SlugProbe for ScopedProbe<'_> {
    async fn exists(&self, candidate: &str) -> DomainResult<bool> {
        tracing::debug!(
            schema = %self.query_schema,
            field = %self.field,
            candidate,
            "checking slug availability"
        );
        self.lookup
            .slug_taken(SlugQuery {
                schema: self.query_schema,
                field: self.field,
                candidate,
                view: self.view,
                exclude: self.exclude,
            })
            .await
    }
}
