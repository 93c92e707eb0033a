// tests/support/mocks/lookup.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use mokkan_slugfield::domain::slug::{SlugLookup, SlugQuery};
use mokkan_slugfield::{DomainError, DomainResult};

/// Reports every slug as free for the first `blind_for` checks, the way a
/// lookup racing an uncommitted concurrent write would, then defers to the
/// real store.
pub struct StaleLookup {
    inner: Arc<dyn SlugLookup>,
    remaining: AtomicU32,
    calls: AtomicU32,
}

impl StaleLookup {
    pub fn new(inner: Arc<dyn SlugLookup>, blind_for: u32) -> Self {
        Self {
            inner,
            remaining: AtomicU32::new(blind_for),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SlugLookup for StaleLookup {
    async fn slug_taken(&self, query: SlugQuery<'_>) -> DomainResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let blind = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if blind {
            return Ok(false);
        }
        self.inner.slug_taken(query).await
    }
}

/// Fails every check, like a store that timed out.
pub struct BrokenLookup;

#[async_trait]
impl SlugLookup for BrokenLookup {
    async fn slug_taken(&self, _query: SlugQuery<'_>) -> DomainResult<bool> {
        Err(DomainError::Persistence("query timed out".into()))
    }
}
