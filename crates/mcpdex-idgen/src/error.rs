use jiff::Timestamp;
use mcpdex_core::DirectoryError;
use thiserror::Error;

/// Errors returned by generator initialization and id generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("epoch is ahead of current clock time: epoch={epoch}, now={now}")]
    EpochAhead { epoch: Timestamp, now: Timestamp },
    #[error("overtime limit")]
    OverTimeLimit,
    #[error("generator state lock is poisoned")]
    StatePoisoned,
}

impl From<Error> for DirectoryError {
    fn from(value: Error) -> Self {
        DirectoryError::IdGeneration(value.to_string())
    }
}
