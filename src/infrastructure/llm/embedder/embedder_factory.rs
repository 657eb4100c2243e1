use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::{HashingEmbedder, OpenAiEmbedder};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: the openai embedding provider requires APP_EMBEDDINGS__API_KEY")]
    MissingApiKey,
    #[error("invalid embedding dimension: {0}")]
    InvalidDimension(usize),
}

impl EmbedderFactory {
    pub fn create(settings: &EmbeddingsSettings) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::Hashing => {
                if settings.dimension == 0 {
                    return Err(EmbedderFactoryError::InvalidDimension(settings.dimension));
                }
                tracing::info!(
                    dimension = settings.dimension,
                    "Using offline hashing embedder"
                );
                Ok(Arc::new(HashingEmbedder::new(settings.dimension)))
            }
            EmbeddingProvider::OpenAi => {
                let key = Some(settings.api_key.clone())
                    .filter(|k| !k.is_empty())
                    .ok_or(EmbedderFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, base_url = %settings.base_url, "Using OpenAI-compatible embedding model");
                Ok(Arc::new(OpenAiEmbedder::new(
                    &settings.base_url,
                    key,
                    settings.model.clone(),
                )))
            }
        }
    }
}
