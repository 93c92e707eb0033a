// src/application/ports/util.rs
use crate::domain::slug::config::NormalizerOptions;

/// Turns free text into a canonical slug base. Implementations must be pure:
/// the same input and options always produce the same output.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str, preserve_unicode: bool, options: &NormalizerOptions) -> String;
}
