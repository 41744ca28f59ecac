//! Test doubles shared by the service tests.

use async_trait::async_trait;
use jiff::Timestamp;
use mcpdex_core::{
    Enricher, Enrichment, EnrichmentError, FieldMap, ReadStore, RecordStore, ServerId,
    StorageError,
};
use mcpdex_idgen::Clock;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) struct FixedClock(Timestamp);

impl FixedClock {
    pub(crate) fn at(rfc3339: &str) -> Self {
        Self(rfc3339.parse().unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Returns the same outcome on every call and counts the calls.
pub(crate) struct ScriptedEnricher {
    outcome: Result<Enrichment, EnrichmentError>,
    calls: AtomicUsize,
}

impl ScriptedEnricher {
    pub(crate) fn succeeding(description: &str, short_description: &str) -> Self {
        Self {
            outcome: Ok(Enrichment::new(description, short_description)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(error: EnrichmentError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Enricher for ScriptedEnricher {
    async fn generate(&self, _name: &str, _url: &str) -> Result<Enrichment, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// A store whose every operation fails.
pub(crate) struct FailingStore;

fn unavailable<T>() -> Result<T, StorageError> {
    Err(StorageError::Unavailable("connection refused".into()))
}

#[async_trait]
impl ReadStore for FailingStore {
    async fn list_ids(&self) -> Result<Vec<ServerId>, StorageError> {
        unavailable()
    }

    async fn get_fields(&self, _id: &ServerId) -> Result<Option<FieldMap>, StorageError> {
        unavailable()
    }

    async fn top_ranked(&self, _count: usize) -> Result<Vec<(ServerId, f64)>, StorageError> {
        unavailable()
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn set_fields(&self, _id: &ServerId, _fields: FieldMap) -> Result<(), StorageError> {
        unavailable()
    }

    async fn register(&self, _id: &ServerId) -> Result<(), StorageError> {
        unavailable()
    }

    async fn increment_score(&self, _id: &ServerId, _delta: f64) -> Result<f64, StorageError> {
        unavailable()
    }
}
