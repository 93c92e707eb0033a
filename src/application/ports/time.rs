// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of the timestamps stores stamp onto documents.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
