use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use mcpdex_core::{FieldMap, ReadStore, RecordStore, ServerId};
use parking_lot::Mutex;
use std::cmp::Ordering;

/// In-memory implementation of the record store.
///
/// Record fields and scores live in `DashMap`s so concurrent requests on
/// different ids don't contend. The registry is a plain list guarded by a
/// mutex because its enumeration order (insertion order) is observable.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<ServerId, FieldMap>,
    registry: Mutex<Vec<ServerId>>,
    ranking: DashMap<ServerId, f64>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
            registry: Mutex::new(Vec::with_capacity(capacity)),
            ranking: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl ReadStore for InMemoryStore {
    async fn list_ids(&self) -> Result<Vec<ServerId>> {
        Ok(self.registry.lock().clone())
    }

    async fn get_fields(&self, id: &ServerId) -> Result<Option<FieldMap>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn top_ranked(&self, count: usize) -> Result<Vec<(ServerId, f64)>> {
        let mut ranked: Vec<(ServerId, f64)> = self
            .ranking
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        // Same order as ZREVRANGE: score descending, ties by member descending.
        ranked.sort_by(|(a_id, a_score), (b_id, b_score)| {
            b_score
                .partial_cmp(a_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b_id.cmp(a_id))
        });
        ranked.truncate(count);

        Ok(ranked)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn set_fields(&self, id: &ServerId, fields: FieldMap) -> Result<()> {
        self.records.entry(id.clone()).or_default().extend(fields);
        Ok(())
    }

    async fn register(&self, id: &ServerId) -> Result<()> {
        let mut registry = self.registry.lock();
        if !registry.contains(id) {
            registry.push(id.clone());
        }
        Ok(())
    }

    async fn increment_score(&self, id: &ServerId, delta: f64) -> Result<f64> {
        let mut score = self.ranking.entry(id.clone()).or_insert(0.0);
        *score += delta;
        Ok(*score)
    }
}
