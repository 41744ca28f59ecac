use thiserror::Error;

/// Errors surfaced by the directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum EnrichmentError {
    #[error("enrichment provider unreachable: {0}")]
    Transport(String),
    #[error("enrichment provider timed out: {0}")]
    Timeout(String),
    #[error("enrichment provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("enrichment output is malformed: {0}")]
    MalformedOutput(String),
}

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("enrichment failed: {0}")]
    Enrichment(#[from] EnrichmentError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("id generation failed: {0}")]
    IdGeneration(String),
}

impl From<std::convert::Infallible> for DirectoryError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
