//! Record id generation.
//!
//! [`Flake`] issues time-ordered ids carrying random entropy for production
//! use; [`SeqGenerator`] issues predictable ids for tests.

mod clock;
pub mod error;
mod flake;
mod flake_id;
pub mod seq;

pub use clock::{Clock, SystemClock};
pub use error::Error;
pub use flake::{Flake, FlakeSettings};
pub use flake_id::FlakeId;
pub use seq::SeqGenerator;

use mcpdex_core::{DirectoryError, ServerId};

/// Trait for generating record ids.
///
/// Implementations are pure generators that don't interact with storage,
/// and must never hand out the same id twice.
pub trait IdGenerator: Send + Sync + 'static {
    type Error: Into<DirectoryError>;

    fn next_server_id(&self) -> Result<ServerId, Self::Error>;
}

impl<C: Clock + 'static> IdGenerator for Flake<C> {
    type Error = Error;

    fn next_server_id(&self) -> Result<ServerId, Self::Error> {
        self.next_id().map(ServerId::from)
    }
}
