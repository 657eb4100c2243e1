mod embedder;
mod mock_llm_client;
mod openai_client;

pub use embedder::{EmbedderFactory, EmbedderFactoryError, HashingEmbedder, OpenAiEmbedder};
pub use mock_llm_client::MockLlmClient;
pub use openai_client::OpenAiClient;
