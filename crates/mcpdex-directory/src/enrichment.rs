use mcpdex_core::{
    DirectoryError, Enricher, Enrichment, RecordStore, ServerId, StatusUpdate, StorageError,
};
use mcpdex_idgen::Clock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Error detail stored on a record whose enrichment failed.
pub const ENRICHMENT_FAILED_DETAIL: &str = "Failed to generate description";

/// Runs the enricher for one record and writes the outcome onto it.
///
/// Each run overwrites the enrichment fields of the previous one. Nothing is
/// retried: a failed run leaves the record `failed` until the next run.
pub struct EnrichmentOrchestrator<S, E> {
    store: Arc<S>,
    enricher: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<S, E> Clone for EnrichmentOrchestrator<S, E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            enricher: Arc::clone(&self.enricher),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore, E: Enricher> EnrichmentOrchestrator<S, E> {
    pub fn new(store: Arc<S>, enricher: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            enricher,
            clock,
        }
    }

    pub fn enricher(&self) -> Arc<E> {
        Arc::clone(&self.enricher)
    }

    /// Generates descriptions without touching any record.
    pub async fn generate(
        &self,
        name: &str,
        repository_url: &str,
    ) -> Result<Enrichment, DirectoryError> {
        Ok(self.enricher.generate(name, repository_url).await?)
    }

    /// Generates descriptions for `id` and stores them, or marks the record
    /// failed.
    pub async fn run(
        &self,
        id: &ServerId,
        name: &str,
        repository_url: &str,
    ) -> Result<Enrichment, DirectoryError> {
        debug!(id = %id, "Generating descriptions");

        let enrichment = match self.enricher.generate(name, repository_url).await {
            Ok(enrichment) => enrichment,
            Err(e) => {
                warn!(id = %id, error = %e, "Enrichment failed");
                self.mark_failed(id).await;
                return Err(e.into());
            }
        };

        let update = StatusUpdate::Completed(enrichment.clone());
        if let Err(e) = self.write(id, update).await {
            warn!(id = %id, error = %e, "Failed to store enrichment");
            self.mark_failed(id).await;
            return Err(e.into());
        }

        info!(id = %id, "Enrichment completed");
        Ok(enrichment)
    }

    /// Runs enrichment on a detached task.
    ///
    /// The outcome is only observable through the record's status.
    pub fn spawn(&self, id: ServerId, name: String, repository_url: String) {
        let this = self.clone();
        tokio::spawn(async move {
            // failures already ended up on the record
            let _ = this.run(&id, &name, &repository_url).await;
        });
    }

    async fn write(&self, id: &ServerId, update: StatusUpdate) -> Result<(), StorageError> {
        let fields = update.into_fields(self.clock.now());
        self.store.set_fields(id, fields).await
    }

    /// Best effort: a failure here is logged and dropped.
    async fn mark_failed(&self, id: &ServerId) {
        let update = StatusUpdate::Failed {
            detail: ENRICHMENT_FAILED_DETAIL.to_string(),
        };
        if let Err(e) = self.write(id, update).await {
            error!(id = %id, error = %e, "Failed to mark record as failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, FixedClock, ScriptedEnricher};
    use jiff::Timestamp;
    use mcpdex_core::{EnrichmentError, RecordStatus, ServerRecord};
    use mcpdex_storage::{InMemoryStore, ReadStore};

    async fn seeded_store(id: &ServerId) -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let record = ServerRecord::new(
            id.clone(),
            "pdf-mcp-server",
            "https://github.com/pdf-ai/pdf-mcp-server",
            Timestamp::UNIX_EPOCH,
        );
        store.set_fields(id, record.to_fields()).await.unwrap();
        store
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::at("2026-03-01T12:00:00Z"))
    }

    #[tokio::test]
    async fn success_completes_the_record() {
        let id = ServerId::new_unchecked("server-a");
        let store = seeded_store(&id).await;
        let enricher = Arc::new(ScriptedEnricher::succeeding("Long", "Short"));
        let orchestrator = EnrichmentOrchestrator::new(store.clone(), enricher, clock());

        orchestrator
            .run(&id, "pdf-mcp-server", "https://github.com/pdf-ai/pdf-mcp-server")
            .await
            .unwrap();

        let record = store.get_record(&id).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::Completed);
        assert_eq!(record.description.as_deref(), Some("Long"));
        assert_eq!(record.short_description.as_deref(), Some("Short"));
        assert_eq!(record.updated_at, Some("2026-03-01T12:00:00Z".parse().unwrap()));
        assert_eq!(record.created_at, Timestamp::UNIX_EPOCH);
    }

    #[tokio::test]
    async fn failure_marks_the_record_failed() {
        let id = ServerId::new_unchecked("server-a");
        let store = seeded_store(&id).await;
        let enricher = Arc::new(ScriptedEnricher::failing(EnrichmentError::Timeout(
            "slow".into(),
        )));
        let orchestrator = EnrichmentOrchestrator::new(store.clone(), enricher, clock());

        let err = orchestrator
            .run(&id, "pdf-mcp-server", "https://github.com/pdf-ai/pdf-mcp-server")
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Enrichment(EnrichmentError::Timeout(_))));

        let record = store.get_record(&id).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::Failed);
        assert_eq!(record.error.as_deref(), Some(ENRICHMENT_FAILED_DETAIL));
        assert!(record.description.is_none());
    }

    #[tokio::test]
    async fn rerun_overwrites_previous_outcome() {
        let id = ServerId::new_unchecked("server-a");
        let store = seeded_store(&id).await;

        let failing = EnrichmentOrchestrator::new(
            store.clone(),
            Arc::new(ScriptedEnricher::failing(EnrichmentError::Transport("down".into()))),
            clock(),
        );
        let _ = failing.run(&id, "n", "u").await;

        let succeeding = EnrichmentOrchestrator::new(
            store.clone(),
            Arc::new(ScriptedEnricher::succeeding("First", "one")),
            clock(),
        );
        succeeding.run(&id, "n", "u").await.unwrap();
        let before = store.get_fields(&id).await.unwrap().unwrap();
        succeeding.run(&id, "n", "u").await.unwrap();
        let after = store.get_fields(&id).await.unwrap().unwrap();

        assert_eq!(before, after);
        let record = store.get_record(&id).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::Completed);
        assert!(record.error.is_none());
    }

    #[tokio::test]
    async fn store_failure_is_reported_without_panicking() {
        let orchestrator = EnrichmentOrchestrator::new(
            Arc::new(FailingStore),
            Arc::new(ScriptedEnricher::succeeding("Long", "Short")),
            clock(),
        );

        let err = orchestrator
            .run(&ServerId::new_unchecked("server-a"), "n", "u")
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Storage(_)));
    }
}
