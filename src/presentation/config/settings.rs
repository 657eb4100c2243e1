use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub embeddings: EmbeddingsSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub qa_model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub top_p: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Hashing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub strategy: ChunkingStrategy,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Applied to `chunk_size` for section groups, which hold several related sections.
    pub grouped_size_multiplier: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    Sectioned,
    Plain,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub fetch_k_multiplier: usize,
    pub lambda_mult: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Built-in defaults, then `appsettings.{environment}.toml` if present, then
    /// `APP_*` environment variables (`APP_LLM__API_KEY` sets `llm.api_key`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_mb", 50)?
            .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
            .set_default("llm.api_key", "")?
            .set_default("llm.qa_model", "llama-3.3-70b-versatile")?
            .set_default("llm.temperature", 0.0)?
            .set_default("llm.max_tokens", 1024)?
            .set_default("llm.top_p", 0.9)?
            .set_default("embeddings.provider", "hashing")?
            .set_default("embeddings.base_url", "https://api.openai.com/v1")?
            .set_default("embeddings.api_key", "")?
            .set_default("embeddings.model", "text-embedding-3-small")?
            .set_default("embeddings.dimension", 384)?
            .set_default("chunking.strategy", "sectioned")?
            .set_default("chunking.chunk_size", 1000)?
            .set_default("chunking.chunk_overlap", 200)?
            .set_default("chunking.grouped_size_multiplier", 2)?
            .set_default("retrieval.top_k", 4)?
            .set_default("retrieval.fetch_k_multiplier", 3)?
            .set_default("retrieval.lambda_mult", 0.7)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(
                File::with_name(&environment.settings_file()).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
