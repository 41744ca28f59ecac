mod cli;
mod logging;

use crate::cli::{EnricherArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use mcpdex_core::{Directory, Enricher, RecordStore};
use mcpdex_directory::DirectoryService;
use mcpdex_enrichment::{OpenAiEnricher, OpenAiSettings, TemplateEnricher};
use mcpdex_gateway::{App, AppState};
use mcpdex_idgen::{Flake, FlakeSettings};
use mcpdex_storage::{InMemoryStore, KeySpace, RedisStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    logging::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        enricher = %config.enricher,
        "starting gateway server"
    );

    let directory = match config.storage {
        StorageBackendArg::InMemory => with_enricher(InMemoryStore::new(), &config)?,
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let keys = KeySpace::with_namespace(config.redis_key_prefix.clone());
            let store = RedisStore::connect(redis_url, keys).await?;
            store.ping().await?;
            with_enricher(store, &config)?
        }
    };

    let app = App::router(AppState::new(directory));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

fn with_enricher<S: RecordStore>(store: S, config: &CLI) -> anyhow::Result<Arc<dyn Directory>> {
    match config.enricher {
        EnricherArg::Template => assemble(store, TemplateEnricher::new()),
        EnricherArg::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .context("an API key is required when the enricher is openai")?;
            let settings = OpenAiSettings::builder()
                .api_key(api_key)
                .base_url(config.openai_base_url.clone())
                .model(config.openai_model.clone())
                .timeout(Duration::from_secs(config.enrichment_timeout_secs))
                .build();
            assemble(store, OpenAiEnricher::new(settings)?)
        }
    }
}

fn assemble<S: RecordStore, E: Enricher>(store: S, enricher: E) -> anyhow::Result<Arc<dyn Directory>> {
    let generator = Flake::new(FlakeSettings::default())?;
    Ok(Arc::new(DirectoryService::new(store, enricher, generator)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
