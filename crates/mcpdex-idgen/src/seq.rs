use crate::IdGenerator;
use mcpdex_core::ServerId;
use std::sync::atomic::{AtomicU64, Ordering};

/// A sequential id generator, producing `server-000000`, `server-000001`, ...
///
/// Ids are unique within one instance only. Meant for tests and
/// single-process local runs with in-memory storage.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_prefix("server-")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a generator whose first id uses `offset` as its counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SeqGenerator {
    type Error = std::convert::Infallible;

    fn next_server_id(&self) -> Result<ServerId, Self::Error> {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(ServerId::new_unchecked(format!("{}{:06}", self.prefix, count)))
    }
}
