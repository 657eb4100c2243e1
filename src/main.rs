use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use logidoc::application::ports::MmrParams;
use logidoc::application::services::{ExtractionService, IngestionService, QaService};
use logidoc::infrastructure::llm::{EmbedderFactory, OpenAiClient};
use logidoc::infrastructure::observability::{TracingConfig, init_tracing};
use logidoc::infrastructure::persistence::InMemoryVectorStore;
use logidoc::infrastructure::text_processing::{CompositeFileLoader, TextSplitterFactory};
use logidoc::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env()?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings, environment.name()),
        settings.server.port,
    );

    if settings.llm.api_key.is_empty() {
        tracing::warn!("APP_LLM__API_KEY is not set; question answering and extraction will degrade");
    }

    let file_loader = Arc::new(CompositeFileLoader::with_defaults());
    let text_splitter =
        TextSplitterFactory::create(&settings.chunking).context("Invalid chunking settings")?;
    let embedder =
        EmbedderFactory::create(&settings.embeddings).context("Invalid embedding settings")?;
    let llm_client = Arc::new(OpenAiClient::new(&settings.llm));
    let vector_store = Arc::new(InMemoryVectorStore::new());

    tracing::info!(
        model = llm_client.model(),
        strategy = ?settings.chunking.strategy,
        "Adapters initialized"
    );

    let ingestion_service = Arc::new(IngestionService::new(
        file_loader,
        Arc::clone(&embedder),
        Arc::clone(&vector_store),
        text_splitter,
    ));
    let extraction_service = Arc::new(ExtractionService::new(Arc::clone(&llm_client)));
    let qa_service = Arc::new(QaService::new(
        embedder,
        llm_client,
        vector_store,
        MmrParams {
            k: settings.retrieval.top_k,
            fetch_k: settings
                .retrieval
                .top_k
                .saturating_mul(settings.retrieval.fetch_k_multiplier),
            lambda_mult: settings.retrieval.lambda_mult,
        },
    ));

    let state = AppState::new(ingestion_service, extraction_service, qa_service);
    let router = create_router(state, settings.max_upload_bytes());

    let addr = settings.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
