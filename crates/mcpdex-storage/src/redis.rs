use crate::error::{map_redis_error, Result};
use async_trait::async_trait;
use mcpdex_core::{FieldMap, ReadStore, RecordStore, ServerId};
use redis::AsyncCommands;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

const REGISTRY_KEY: &str = "servers";
const RECORD_KEY_PREFIX: &str = "server:";
const RANKING_KEY: &str = "trending_servers";

/// Key layout of the directory in Redis.
///
/// With the default empty namespace the keys are `servers`,
/// `server:<id>` and `trending_servers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    /// Creates a key space whose keys all start with `namespace`.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn registry(&self) -> String {
        format!("{}{REGISTRY_KEY}", self.namespace)
    }

    pub fn record(&self, id: &ServerId) -> String {
        format!("{}{RECORD_KEY_PREFIX}{}", self.namespace, id.as_str())
    }

    pub fn ranking(&self) -> String {
        format!("{}{RANKING_KEY}", self.namespace)
    }
}

/// A Redis-backed record store.
///
/// Records are hashes, the registry is a set and the trending ranking is a
/// sorted set. The multiplexed connection is cloned per call, so one store
/// serves any number of concurrent requests.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::MultiplexedConnection,
    keys: KeySpace,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Creates a store on top of an existing connection, using the default key space.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_keys(conn, KeySpace::default())
    }

    /// Creates a store on top of an existing connection with a custom key space.
    pub fn with_keys(conn: redis::aio::MultiplexedConnection, keys: KeySpace) -> Self {
        Self { conn, keys }
    }

    /// Opens a new connection to `redis_url`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use mcpdex_storage::{KeySpace, RedisStore};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = RedisStore::connect("redis://127.0.0.1:6379", KeySpace::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(redis_url: &str, keys: KeySpace) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("invalid Redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        debug!(keys = ?keys, "connected to Redis");
        Ok(Self::with_keys(conn, keys))
    }

    /// Returns the key layout in use.
    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }
}

#[async_trait]
impl ReadStore for RedisStore {
    async fn list_ids(&self) -> Result<Vec<ServerId>> {
        trace!("Listing registry members");

        let mut conn = self.conn.clone();
        let members: Vec<String> = conn
            .smembers(self.keys.registry())
            .await
            .map_err(|e| {
                warn!(error = %e, "Redis error on registry read");
                map_redis_error("failed to read registry", e)
            })?;

        Ok(members.into_iter().map(ServerId::new_unchecked).collect())
    }

    async fn get_fields(&self, id: &ServerId) -> Result<Option<FieldMap>> {
        trace!(id = %id, "Fetching record fields from Redis");

        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(self.keys.record(id))
            .await
            .map_err(|e| {
                warn!(id = %id, error = %e, "Redis error on record read");
                map_redis_error("failed to read record", e)
            })?;

        if fields.is_empty() {
            trace!(id = %id, "Record has no fields");
            return Ok(None);
        }

        Ok(Some(fields.into_iter().collect()))
    }

    async fn top_ranked(&self, count: usize) -> Result<Vec<(ServerId, f64)>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let stop = isize::try_from(count - 1).unwrap_or(isize::MAX);
        let mut conn = self.conn.clone();
        let ranked: Vec<(String, f64)> = conn
            .zrevrange_withscores(self.keys.ranking(), 0, stop)
            .await
            .map_err(|e| {
                warn!(error = %e, "Redis error on ranking read");
                map_redis_error("failed to read trending ranking", e)
            })?;

        Ok(ranked
            .into_iter()
            .map(|(member, score)| (ServerId::new_unchecked(member), score))
            .collect())
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn set_fields(&self, id: &ServerId, fields: FieldMap) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        trace!(id = %id, count = fields.len(), "Writing record fields to Redis");
        let items: Vec<(String, String)> = fields.into_iter().collect();

        let mut conn = self.conn.clone();
        conn.hset_multiple::<_, _, _, ()>(self.keys.record(id), &items)
            .await
            .map_err(|e| {
                warn!(id = %id, error = %e, "Failed to write record fields");
                map_redis_error("failed to write record", e)
            })
    }

    async fn register(&self, id: &ServerId) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.sadd::<_, _, ()>(self.keys.registry(), id.as_str())
            .await
            .map_err(|e| {
                warn!(id = %id, error = %e, "Failed to add id to registry");
                map_redis_error("failed to write registry", e)
            })
    }

    async fn increment_score(&self, id: &ServerId, delta: f64) -> Result<f64> {
        let mut conn = self.conn.clone();
        let score: f64 = conn
            .zincr(self.keys.ranking(), id.as_str(), delta)
            .await
            .map_err(|e| {
                warn!(id = %id, error = %e, "Failed to increment trending score");
                map_redis_error("failed to increment trending score", e)
            })?;

        debug!(id = %id, score, "Incremented trending score");
        Ok(score)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| map_redis_error("failed to ping Redis", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Behaviour against a live server is covered by tests/redis_store_integration.rs.

    #[test]
    fn default_key_layout() {
        let keys = KeySpace::default();
        assert_eq!(keys.registry(), "servers");
        assert_eq!(keys.record(&ServerId::new_unchecked("server-1")), "server:server-1");
        assert_eq!(keys.ranking(), "trending_servers");
    }

    #[test]
    fn namespaced_key_layout() {
        let keys = KeySpace::with_namespace("mcpdex:");
        assert_eq!(keys.registry(), "mcpdex:servers");
        assert_eq!(
            keys.record(&ServerId::new_unchecked("server-1")),
            "mcpdex:server:server-1"
        );
        assert_eq!(keys.ranking(), "mcpdex:trending_servers");
    }
}
