use logidoc::infrastructure::llm::{EmbedderFactory, EmbedderFactoryError};
use logidoc::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

fn settings(provider: EmbeddingProvider, api_key: &str, dimension: usize) -> EmbeddingsSettings {
    EmbeddingsSettings {
        provider,
        base_url: "https://api.openai.com/v1".to_string(),
        api_key: api_key.to_string(),
        model: "text-embedding-3-small".to_string(),
        dimension,
    }
}

#[tokio::test]
async fn given_hashing_provider_when_creating_then_embeds_with_configured_dimension() {
    let embedder = EmbedderFactory::create(&settings(EmbeddingProvider::Hashing, "", 32)).unwrap();

    let embedding = embedder.embed("Drop at Houston").await.unwrap();

    assert_eq!(embedding.dimensions(), 32);
}

#[test]
fn given_hashing_provider_with_zero_dimension_when_creating_then_returns_error() {
    let result = EmbedderFactory::create(&settings(EmbeddingProvider::Hashing, "", 0));

    assert!(matches!(result, Err(EmbedderFactoryError::InvalidDimension(0))));
}

#[test]
fn given_openai_provider_without_key_when_creating_then_returns_missing_api_key() {
    let result = EmbedderFactory::create(&settings(EmbeddingProvider::OpenAi, "", 1536));

    assert!(matches!(result, Err(EmbedderFactoryError::MissingApiKey)));
}

#[test]
fn given_openai_provider_with_key_when_creating_then_succeeds() {
    assert!(EmbedderFactory::create(&settings(EmbeddingProvider::OpenAi, "sk-test", 1536)).is_ok());
}
