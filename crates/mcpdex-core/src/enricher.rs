use crate::error::EnrichmentError;
use crate::record::Enrichment;
use async_trait::async_trait;

/// Produces descriptive text for a submitted server.
///
/// Implementations talk to a text-generation provider or derive the text
/// locally. They never touch the record store; writing the outcome back is
/// the caller's job.
#[async_trait]
pub trait Enricher: Send + Sync + 'static {
    /// Generates a long description and a short one-line summary.
    async fn generate(
        &self,
        name: &str,
        repository_url: &str,
    ) -> Result<Enrichment, EnrichmentError>;
}
