// src/domain/slug/services/mod.rs
mod lifecycle;
mod resolver;

pub use lifecycle::SlugLifecycleController;
pub use resolver::{DEFAULT_MAX_ATTEMPTS, ResolveError, SlugProbe, UniqueSlugResolver};
