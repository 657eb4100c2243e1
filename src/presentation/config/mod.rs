mod environment;
mod settings;

pub use environment::{Environment, UnknownEnvironment};
pub use settings::{
    ChunkingSettings, ChunkingStrategy, EmbeddingProvider, EmbeddingsSettings, LlmSettings,
    LoggingSettings, RetrievalSettings, ServerSettings, Settings,
};
