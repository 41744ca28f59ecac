//! Core types and traits for the mcpdex server directory.
//!
//! This crate provides the shared record model, the record store contract,
//! the enrichment contract and the [`Directory`] facade used by both the
//! directory services and the HTTP gateway.

pub mod directory;
pub mod enricher;
pub mod error;
pub mod id;
pub mod record;
pub mod store;
pub mod view;

pub use directory::{DescribeParams, Directory, SubmitParams};
pub use enricher::Enricher;
pub use error::{DirectoryError, EnrichmentError, StorageError};
pub use id::ServerId;
pub use record::{Enrichment, FieldMap, RecordStatus, ServerRecord, StatusUpdate};
pub use store::{ReadStore, RecordStore};
pub use view::{Metrics, PresentationDefaults, ServerView};
