use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::value_objects::SlugCandidate;
use async_trait::async_trait;
use thiserror::Error;

/// Default cap on existence checks for a single resolution.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// The "does this slug already exist?" predicate. Each call is expected to
/// hit the store; results are never cached between resolutions.
#[async_trait]
pub trait SlugProbe: Send + Sync {
    async fn exists(&self, candidate: &str) -> DomainResult<bool>;
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no free slug for base `{base}` after {attempts} attempts")]
    Exhausted { base: String, attempts: u32 },
    #[error(transparent)]
    Store(#[from] DomainError),
}

/// Appends `-1`, `-2`, ... to a base until the probe reports a free value.
///
/// The check and the caller's later write are not atomic: two concurrent
/// resolutions of the same base can both settle on the same candidate. The
/// store's unique index is the backstop, and callers are expected to retry
/// the save when it rejects the write.
#[derive(Debug, Clone, Copy)]
pub struct UniqueSlugResolver {
    max_attempts: u32,
}

impl Default for UniqueSlugResolver {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl UniqueSlugResolver {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub async fn resolve(&self, base: &str, probe: &dyn SlugProbe) -> Result<String, ResolveError> {
        self.resolve_from(SlugCandidate::new(base), probe).await
    }

    pub async fn resolve_from(
        &self,
        start: SlugCandidate,
        probe: &dyn SlugProbe,
    ) -> Result<String, ResolveError> {
        let mut candidate = start;

        for _ in 0..self.max_attempts {
            let attempt = candidate.render();
            if !probe.exists(&attempt).await? {
                return Ok(attempt);
            }
            tracing::debug!(candidate = %attempt, "slug taken, trying next suffix");
            candidate = candidate.next();
        }

        Err(ResolveError::Exhausted {
            base: candidate.base().to_string(),
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct SetProbe {
        taken: HashSet<String>,
        seen: Mutex<Vec<String>>,
    }

    impl SetProbe {
        fn new(taken: &[&str]) -> Self {
            Self {
                taken: taken.iter().map(|s| s.to_string()).collect(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SlugProbe for SetProbe {
        async fn exists(&self, candidate: &str) -> DomainResult<bool> {
            self.seen.lock().unwrap().push(candidate.to_string());
            Ok(self.taken.contains(candidate))
        }
    }

    struct AlwaysTaken;

    #[async_trait]
    impl SlugProbe for AlwaysTaken {
        async fn exists(&self, _candidate: &str) -> DomainResult<bool> {
            Ok(true)
        }
    }

    struct Failing;

    #[async_trait]
    impl SlugProbe for Failing {
        async fn exists(&self, _candidate: &str) -> DomainResult<bool> {
            Err(DomainError::Persistence("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn free_base_is_returned_unchanged() {
        let probe = SetProbe::new(&[]);
        let slug = UniqueSlugResolver::default().resolve("x", &probe).await.unwrap();
        assert_eq!(slug, "x");
        assert_eq!(probe.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn suffixes_count_up_from_one() {
        let resolver = UniqueSlugResolver::default();
        let probe = SetProbe::new(&["x"]);
        assert_eq!(resolver.resolve("x", &probe).await.unwrap(), "x-1");

        let probe = SetProbe::new(&["x", "x-1"]);
        assert_eq!(resolver.resolve("x", &probe).await.unwrap(), "x-2");
        assert_eq!(*probe.seen.lock().unwrap(), vec!["x", "x-1", "x-2"]);
    }

    #[tokio::test]
    async fn gaps_in_existing_suffixes_are_filled() {
        let probe = SetProbe::new(&["x", "x-2"]);
        let slug = UniqueSlugResolver::default().resolve("x", &probe).await.unwrap();
        assert_eq!(slug, "x-1");
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let err = UniqueSlugResolver::new(5)
            .resolve("x", &AlwaysTaken)
            .await
            .unwrap_err();
        match err {
            ResolveError::Exhausted { base, attempts } => {
                assert_eq!(base, "x");
                assert_eq!(attempts, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn probe_failures_propagate() {
        let err = UniqueSlugResolver::default()
            .resolve("x", &Failing)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Store(DomainError::Persistence(_))));
    }

    #[tokio::test]
    async fn suffixed_start_skips_bare_base() {
        let probe = SetProbe::new(&["-1"]);
        let slug = UniqueSlugResolver::default()
            .resolve_from(SlugCandidate::suffixed(""), &probe)
            .await
            .unwrap();
        assert_eq!(slug, "-2");
    }
}
