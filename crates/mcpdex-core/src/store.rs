use crate::error::StorageError;
use crate::id::ServerId;
use crate::record::{FieldMap, ServerRecord};
use async_trait::async_trait;

/// Type alias for record store results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the record store.
///
/// Services that only read (search, trending, lookup) depend on this trait
/// alone.
#[async_trait]
pub trait ReadStore: Send + Sync + 'static {
    /// Lists every id in the registry, in the store's enumeration order.
    async fn list_ids(&self) -> Result<Vec<ServerId>>;

    /// Reads all fields of a record.
    /// Returns `None` if the record has no fields.
    async fn get_fields(&self, id: &ServerId) -> Result<Option<FieldMap>>;

    /// Reads up to `count` ids of the trending ranking, highest score first.
    async fn top_ranked(&self, count: usize) -> Result<Vec<(ServerId, f64)>>;

    /// Reads and decodes a record.
    async fn get_record(&self, id: &ServerId) -> Result<Option<ServerRecord>> {
        match self.get_fields(id).await? {
            Some(fields) => ServerRecord::from_fields(id, &fields).map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
pub trait RecordStore: ReadStore {
    /// Writes the given fields onto a record, leaving other fields untouched.
    async fn set_fields(&self, id: &ServerId, fields: FieldMap) -> Result<()>;

    /// Adds an id to the registry. Adding an id twice is not an error.
    async fn register(&self, id: &ServerId) -> Result<()>;

    /// Increments the trending score of an id and returns the new score.
    async fn increment_score(&self, id: &ServerId, delta: f64) -> Result<f64>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
