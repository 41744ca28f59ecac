use crate::enrichment::EnrichmentOrchestrator;
use crate::fallback::{BuiltinFallbacks, FallbackProvider};
use crate::search::{self, Query};
use crate::trending::{self, MAX_TRENDING_COUNT};
use async_trait::async_trait;
use mcpdex_core::{
    DescribeParams, Directory, DirectoryError, Enricher, Enrichment, RecordStore, ServerId,
    ServerRecord, ServerView, StorageError, SubmitParams,
};
use mcpdex_idgen::{Clock, IdGenerator, SystemClock};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

type Result<T, E = DirectoryError> = std::result::Result<T, E>;

/// Trending score added to a record on submission.
const SUBMISSION_SCORE: f64 = 1.0;

/// The directory, built from a record store, an enricher and an id generator.
///
/// Submissions hand their enrichment to a detached task; reads never cache
/// anything between calls.
pub struct DirectoryService<S, E, G, F = BuiltinFallbacks> {
    store: Arc<S>,
    generator: Arc<G>,
    fallbacks: Arc<F>,
    clock: Arc<dyn Clock>,
    enrichment: EnrichmentOrchestrator<S, E>,
}

impl<S, E, G> DirectoryService<S, E, G>
where
    S: RecordStore,
    E: Enricher,
    G: IdGenerator,
{
    pub fn new(store: S, enricher: E, generator: G) -> Self {
        let store = Arc::new(store);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            enrichment: EnrichmentOrchestrator::new(
                Arc::clone(&store),
                Arc::new(enricher),
                Arc::clone(&clock),
            ),
            store,
            generator: Arc::new(generator),
            fallbacks: Arc::new(BuiltinFallbacks),
            clock,
        }
    }
}

impl<S, E, G, F> DirectoryService<S, E, G, F>
where
    S: RecordStore,
    E: Enricher,
    G: IdGenerator,
    F: FallbackProvider,
{
    /// Replaces the fallback catalog.
    pub fn with_fallbacks<F2: FallbackProvider>(self, fallbacks: F2) -> DirectoryService<S, E, G, F2> {
        DirectoryService {
            store: self.store,
            generator: self.generator,
            fallbacks: Arc::new(fallbacks),
            clock: self.clock,
            enrichment: self.enrichment,
        }
    }

    /// Replaces the clock used for record timestamps.
    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        Self {
            enrichment: EnrichmentOrchestrator::new(
                Arc::clone(&self.store),
                self.enrichment.enricher(),
                Arc::clone(&clock),
            ),
            clock,
            ..self
        }
    }

    /// Reads every registered record, skipping ids whose fields are missing
    /// or undecodable.
    async fn load_all(&self) -> Result<Vec<ServerRecord>, StorageError> {
        let ids = self.store.list_ids().await?;
        trace!(count = ids.len(), "Loading registry");

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.load(&id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn load(&self, id: &ServerId) -> Result<Option<ServerRecord>, StorageError> {
        match self.store.get_record(id).await {
            Ok(record) => Ok(record),
            Err(StorageError::InvalidData(reason)) => {
                warn!(id = %id, reason = %reason, "Skipping undecodable record");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn view(&self, record: ServerRecord) -> ServerView {
        ServerView::from_record(record, self.fallbacks.presentation_defaults())
    }

    async fn ranked_views(&self, count: usize) -> Result<Vec<ServerView>, StorageError> {
        let ranked = self.store.top_ranked(count).await?;

        let mut servers = Vec::with_capacity(ranked.len());
        for (id, score) in ranked {
            match self.load(&id).await? {
                Some(record) => servers.push(self.view(record).with_trending_score(score)),
                None => debug!(id = %id, "Ranked id has no record"),
            }
        }
        Ok(servers)
    }
}

#[async_trait]
impl<S, E, G, F> Directory for DirectoryService<S, E, G, F>
where
    S: RecordStore,
    E: Enricher,
    G: IdGenerator,
    F: FallbackProvider,
{
    async fn submit(&self, params: SubmitParams) -> Result<ServerRecord> {
        let name = params.name.trim();
        let repository_url = params.repository_url.trim();
        if name.is_empty() || repository_url.is_empty() {
            return Err(DirectoryError::InvalidArgument(
                "Name and GitHub URL are required".to_string(),
            ));
        }

        let id = self
            .generator
            .next_server_id()
            .map_err(Into::<DirectoryError>::into)?;
        let record = ServerRecord::new(id, name, repository_url, self.clock.now());

        // fields before registry membership, so a registered id always resolves
        self.store.set_fields(&record.id, record.to_fields()).await?;
        self.store.register(&record.id).await?;
        self.store
            .increment_score(&record.id, SUBMISSION_SCORE)
            .await?;

        info!(id = %record.id, name = %record.name, "Server submitted");
        self.enrichment.spawn(
            record.id.clone(),
            record.name.clone(),
            record.repository_url.clone(),
        );

        Ok(record)
    }

    async fn search(&self, query: &str) -> Result<Vec<ServerView>> {
        let query = Query::parse(query)
            .ok_or_else(|| DirectoryError::InvalidArgument("Search query is required".to_string()))?;

        let records = match self.load_all().await {
            Ok(records) => records,
            Err(e) => {
                warn!(query = query.as_str(), error = %e, "Search degraded to empty result");
                return Ok(Vec::new());
            }
        };

        let results: Vec<ServerView> = search::rank(&query, records)
            .into_iter()
            .map(|(record, score)| self.view(record).with_match_score(score))
            .collect();

        debug!(query = query.as_str(), count = results.len(), "Search finished");
        Ok(results)
    }

    async fn top_trending(&self, count: usize) -> Vec<ServerView> {
        let count = count.min(MAX_TRENDING_COUNT);
        if count == 0 {
            return Vec::new();
        }

        let real = match self.ranked_views(count).await {
            Ok(servers) => servers,
            Err(e) => {
                warn!(error = %e, "Trending degraded to fallback list");
                Vec::new()
            }
        };

        trending::pad(real, self.fallbacks.servers(), count)
    }

    async fn fetch_by_name(&self, name: &str) -> Result<ServerView> {
        if name.trim().is_empty() {
            return Err(DirectoryError::InvalidArgument(
                "Server name is required".to_string(),
            ));
        }

        self.load_all()
            .await?
            .into_iter()
            .find(|record| record.name == name)
            .map(|record| self.view(record))
            .ok_or_else(|| DirectoryError::NotFound("Server not found".to_string()))
    }

    async fn describe(&self, params: DescribeParams) -> Result<Enrichment> {
        if params.name.trim().is_empty() || params.repository_url.trim().is_empty() {
            return Err(DirectoryError::InvalidArgument(
                "Name and GitHub URL are required".to_string(),
            ));
        }

        let Some(id) = params.id else {
            return self
                .enrichment
                .generate(&params.name, &params.repository_url)
                .await;
        };

        // enriching an unknown id would leave a field group outside the registry
        if self.store.get_fields(&id).await?.is_none() {
            return Err(DirectoryError::NotFound("Server not found".to_string()));
        }

        self.enrichment
            .run(&id, &params.name, &params.repository_url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, FixedClock, ScriptedEnricher};
    use mcpdex_core::record::field;
    use mcpdex_core::{EnrichmentError, RecordStatus};
    use mcpdex_idgen::SeqGenerator;
    use mcpdex_storage::{InMemoryStore, ReadStore};
    use std::collections::HashSet;
    use std::time::Duration;

    type TestService = DirectoryService<InMemoryStore, ScriptedEnricher, SeqGenerator>;

    fn service(enricher: ScriptedEnricher) -> TestService {
        DirectoryService::new(InMemoryStore::new(), enricher, SeqGenerator::new())
            .with_clock(FixedClock::at("2026-04-01T00:00:00Z"))
    }

    fn params(name: &str, url: &str) -> SubmitParams {
        SubmitParams {
            name: name.to_string(),
            repository_url: url.to_string(),
        }
    }

    // awaitility sleeps the calling thread between polls; callers run on a
    // multi-thread runtime so the spawned enrichment keeps making progress.
    async fn wait_for_status(service: &TestService, id: &ServerId, status: RecordStatus) {
        awaitility::at_most(Duration::from_secs(5))
            .poll_interval(Duration::from_millis(10))
            .until_async(|| async {
                let record = service.store.get_record(id).await.unwrap().unwrap();
                record.status == status
            })
            .await;
    }

    #[tokio::test]
    async fn submit_stores_registers_and_ranks() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));

        let record = service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap();

        assert_eq!(record.id.as_str(), "server-000000");
        assert_eq!(record.status, RecordStatus::Processing);
        assert!(record.description.is_none());
        assert!(record.short_description.is_none());
        assert_eq!(record.created_at, "2026-04-01T00:00:00Z".parse().unwrap());

        assert_eq!(service.store.list_ids().await.unwrap(), vec![record.id.clone()]);
        assert_eq!(
            service.store.top_ranked(10).await.unwrap(),
            vec![(record.id.clone(), 1.0)]
        );
    }

    #[tokio::test]
    async fn submit_rejects_blank_fields() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));

        for (name, url) in [("", "https://x"), ("x", ""), ("  ", "https://x")] {
            let err = service.submit(params(name, url)).await.unwrap_err();
            assert!(matches!(err, DirectoryError::InvalidArgument(_)));
        }
        assert!(service.store.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_issues_unique_ids() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));

        let mut ids = HashSet::new();
        for _ in 0..50 {
            let record = service
                .submit(params("same-name", "https://github.com/x/y"))
                .await
                .unwrap();
            assert!(ids.insert(record.id));
        }
    }

    #[tokio::test]
    async fn submit_reports_storage_failure() {
        let service = DirectoryService::new(
            FailingStore,
            ScriptedEnricher::succeeding("Long", "Short"),
            SeqGenerator::new(),
        );

        let err = service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Storage(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn enrichment_eventually_completes() {
        let service = service(ScriptedEnricher::succeeding("Long", &"x".repeat(200)));

        let record = service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap();
        wait_for_status(&service, &record.id, RecordStatus::Completed).await;

        let stored = service.store.get_record(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.description.as_deref(), Some("Long"));
        assert!(stored.short_description.unwrap().chars().count() <= 80);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn enrichment_failure_does_not_fail_submission() {
        let service = service(ScriptedEnricher::failing(EnrichmentError::Provider {
            status: 503,
            message: "overloaded".into(),
        }));

        let record = service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap();
        assert_eq!(record.status, RecordStatus::Processing);

        wait_for_status(&service, &record.id, RecordStatus::Failed).await;
    }

    #[tokio::test]
    async fn search_scores_and_orders() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        service
            .submit(params("mcp-toolkit", "https://github.com/ai-community/mcp-toolkit"))
            .await
            .unwrap();
        service
            .submit(params("pdf-mcp-server", "https://github.com/pdf-ai/pdf-mcp-server"))
            .await
            .unwrap();

        let results = service.search("mcp-toolkit").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "mcp-toolkit");
        assert_eq!(results[0].match_score, Some(100));
        assert_eq!(results[0].language, "Unknown");

        assert!(service.search("xyz123").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn presentation_defaults_are_not_persisted() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        let record = service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap();

        let found = service.search("mcp").await.unwrap();
        assert_eq!(found[0].tags, vec!["mcp".to_string(), "server".to_string()]);
        let trending = service.top_trending(5).await;
        assert_eq!(trending[0].language, "Unknown");

        let fields = service.store.get_fields(&record.id).await.unwrap().unwrap();
        for key in [field::STARS, field::FORKS, field::VIEWS, field::TAGS, field::LANGUAGE] {
            assert!(!fields.contains_key(key), "{key} was written back");
        }
    }

    #[tokio::test]
    async fn search_requires_a_query() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        let err = service.search("   ").await.unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn search_degrades_to_empty_on_storage_failure() {
        let service = DirectoryService::new(
            FailingStore,
            ScriptedEnricher::succeeding("Long", "Short"),
            SeqGenerator::new(),
        );
        assert!(service.search("mcp").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trending_pads_with_fallbacks() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        for name in ["first", "second"] {
            service
                .submit(params(name, "https://github.com/x/y"))
                .await
                .unwrap();
        }

        let servers = service.top_trending(5).await;
        let ids: HashSet<_> = servers.iter().map(|s| s.id.clone()).collect();

        assert_eq!(servers.len(), 5);
        assert_eq!(ids.len(), 5);
        // equal scores list the larger id first
        assert_eq!(servers[0].name, "second");
        assert_eq!(servers[1].name, "first");
        assert_eq!(servers[0].trending_score, Some(1.0));
        assert_eq!(servers[2].id.as_str(), "server-1");
    }

    #[tokio::test]
    async fn trending_on_empty_ranking_is_fallbacks() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));

        let servers = service.top_trending(3).await;
        let names: Vec<_> = servers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["anthropic-mcp-server", "mcp-toolkit", "pdf-mcp-server"]);
        assert!(service.top_trending(0).await.is_empty());
    }

    #[tokio::test]
    async fn trending_degrades_to_fallbacks_on_storage_failure() {
        let service = DirectoryService::new(
            FailingStore,
            ScriptedEnricher::succeeding("Long", "Short"),
            SeqGenerator::new(),
        );
        assert_eq!(service.top_trending(4).await.len(), 4);
    }

    #[tokio::test]
    async fn trending_skips_ranked_ids_without_record() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        service
            .store
            .increment_score(&ServerId::new_unchecked("ghost"), 10.0)
            .await
            .unwrap();

        let servers = service.top_trending(2).await;
        assert!(servers.iter().all(|s| s.id.as_str() != "ghost"));
        assert_eq!(servers.len(), 2);
    }

    #[tokio::test]
    async fn fetch_by_exact_name() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap();

        let view = service.fetch_by_name("mcp-js").await.unwrap();
        assert_eq!(view.repository_url, "https://github.com/web-ai/mcp-js");

        let err = service.fetch_by_name("MCP-JS").await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn fetch_propagates_storage_failure() {
        let service = DirectoryService::new(
            FailingStore,
            ScriptedEnricher::succeeding("Long", "Short"),
            SeqGenerator::new(),
        );
        let err = service.fetch_by_name("mcp-js").await.unwrap_err();
        assert!(matches!(err, DirectoryError::Storage(_)));
    }

    #[tokio::test]
    async fn describe_without_id_only_generates() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));

        let enrichment = service
            .describe(DescribeParams {
                name: "mcp-js".into(),
                repository_url: "https://github.com/web-ai/mcp-js".into(),
                id: None,
            })
            .await
            .unwrap();

        assert_eq!(enrichment.short_description(), "Short");
        assert!(service.store.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn describe_with_unknown_id_is_not_found() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));

        let err = service
            .describe(DescribeParams {
                name: "mcp-js".into(),
                repository_url: "https://github.com/web-ai/mcp-js".into(),
                id: Some(ServerId::new_unchecked("server-999999")),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn describe_rewrites_an_existing_record() {
        let service = service(ScriptedEnricher::succeeding("Long", "Short"));
        let record = service
            .submit(params("mcp-js", "https://github.com/web-ai/mcp-js"))
            .await
            .unwrap();
        wait_for_status(&service, &record.id, RecordStatus::Completed).await;

        service
            .describe(DescribeParams {
                name: "mcp-js".into(),
                repository_url: "https://github.com/web-ai/mcp-js".into(),
                id: Some(record.id.clone()),
            })
            .await
            .unwrap();

        let stored = service.store.get_record(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Completed);
        // submission plus one explicit run
        assert_eq!(service.enrichment.enricher().calls(), 2);
    }
}
