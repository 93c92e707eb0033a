use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::{ClockPort, SlugGeneratorPort};
use crate::application::services::ApplicationServices;
use crate::config::SlugSettings;
use crate::domain::errors::SlugResult;
use crate::domain::slug::{SlugLookup, SlugRegistry, UniqueSlugResolver};
use crate::infrastructure::{
    database,
    repositories::{InMemoryDocumentStore, SqliteDocumentStore},
    time::SystemClock,
    util::DefaultSlugGenerator,
};

/// Connects to SQLite, applies migrations and builds the services. `declare`
/// registers every slug field up front; nothing is registered lazily later.
pub async fn sqlite_services<F>(settings: &SlugSettings, declare: F) -> Result<ApplicationServices>
where
    F: FnOnce(&mut SlugRegistry) -> SlugResult<()>,
{
    let pool = database::init_pool(settings.database_url(), settings.database_max_connections())
        .await
        .with_context(|| format!("failed to open {}", settings.database_url()))?;
    database::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let store = Arc::new(SqliteDocumentStore::new(Arc::new(pool), clock));
    let mut registry = new_registry(settings, store.clone());
    declare(&mut registry).context("invalid slug field declaration")?;

    tracing::info!(database = settings.database_url(), "slug services ready");
    Ok(ApplicationServices::new(
        registry,
        store.clone(),
        store,
        settings.save_max_retries(),
    ))
}

/// Same wiring over a process-local store.
pub fn in_memory_services<F>(settings: &SlugSettings, declare: F) -> Result<ApplicationServices>
where
    F: FnOnce(&mut SlugRegistry) -> SlugResult<()>,
{
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let store = Arc::new(InMemoryDocumentStore::new(clock));
    let mut registry = new_registry(settings, store.clone());
    declare(&mut registry).context("invalid slug field declaration")?;

    Ok(ApplicationServices::new(
        registry,
        store.clone(),
        store,
        settings.save_max_retries(),
    ))
}

fn new_registry(settings: &SlugSettings, lookup: Arc<dyn SlugLookup>) -> SlugRegistry {
    let generator: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);
    SlugRegistry::new(
        generator,
        lookup,
        UniqueSlugResolver::new(settings.max_attempts()),
    )
}
