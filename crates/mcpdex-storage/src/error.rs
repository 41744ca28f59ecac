use mcpdex_core::StorageError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Maps a Redis client error onto the storage taxonomy.
pub(crate) fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("timed out") {
        StorageError::Timeout(message)
    } else if lowered.contains("connection refused")
        || lowered.contains("broken pipe")
        || lowered.contains("connection reset")
    {
        StorageError::Unavailable(message)
    } else {
        StorageError::Query(message)
    }
}
