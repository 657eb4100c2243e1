use crate::domain::Chunk;

/// Turns the extracted text of one document into ordered, provenance-tagged chunks.
///
/// Implementations hold no per-document state and perform no I/O.
pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str, filename: &str) -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("invalid splitter configuration: {0}")]
    InvalidConfiguration(String),
}
