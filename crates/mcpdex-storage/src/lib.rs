//! Record store adapters.
//!
//! [`InMemoryStore`] keeps everything in process memory; [`RedisStore`]
//! persists records as hashes, the registry as a set and the trending
//! ranking as a sorted set.

pub mod error;
pub mod memory;
pub mod redis;

pub use error::Result;
pub use mcpdex_core::{ReadStore, RecordStore, StorageError};
pub use memory::InMemoryStore;
pub use self::redis::{KeySpace, RedisStore};
