//! Directory services: submission, enrichment orchestration, search,
//! trending and lookup, behind the [`mcpdex_core::Directory`] trait.

pub mod enrichment;
pub mod fallback;
pub mod search;
pub mod service;
pub mod trending;

#[cfg(test)]
mod testing;

pub use enrichment::{EnrichmentOrchestrator, ENRICHMENT_FAILED_DETAIL};
pub use fallback::{BuiltinFallbacks, FallbackProvider};
pub use service::DirectoryService;
pub use trending::{DEFAULT_TRENDING_COUNT, MAX_TRENDING_COUNT};
