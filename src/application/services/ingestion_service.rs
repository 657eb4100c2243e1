use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, FileLoader, FileLoaderError, TextSplitter, TextSplitterError,
    VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, ContentType, Document, file_extension};

pub struct IngestionService<F, V, T: ?Sized>
where
    F: FileLoader,
    V: VectorStore,
    T: TextSplitter,
{
    file_loader: Arc<F>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<V>,
    text_splitter: Arc<T>,
}

impl<F, V, T: ?Sized> IngestionService<F, V, T>
where
    F: FileLoader,
    V: VectorStore,
    T: TextSplitter,
{
    pub fn new(
        file_loader: Arc<F>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<V>,
        text_splitter: Arc<T>,
    ) -> Self {
        Self {
            file_loader,
            embedder,
            vector_store,
            text_splitter,
        }
    }

    /// Extracts and chunks one file.
    ///
    /// An unsupported extension fails immediately. A document that yields no
    /// text is not an error: it produces no chunks and a warning.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn process_file(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<Vec<Chunk>, IngestionError> {
        let content_type = ContentType::from_filename(filename)
            .ok_or_else(|| IngestionError::UnsupportedFileType(file_extension(filename)))?;
        let document = Document::new(filename.to_string(), content_type, data.len() as u64);

        let text = match self.file_loader.extract_text(data, &document).await {
            Ok(text) => text,
            Err(FileLoaderError::NoTextFound(_)) => {
                tracing::warn!("No text found in document");
                return Ok(Vec::new());
            }
            Err(FileLoaderError::UnsupportedContentType(content_type)) => {
                return Err(IngestionError::UnsupportedFileType(content_type));
            }
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            tracing::warn!("Extracted text is empty");
            return Ok(Vec::new());
        }

        let chunks = self.text_splitter.split(&text, filename)?;
        tracing::info!(
            chars = text.len(),
            chunks = chunks.len(),
            "Document chunked"
        );

        Ok(chunks)
    }

    /// Embeds `chunks` and appends them to the index. Callers await each call
    /// before issuing the next.
    #[tracing::instrument(skip_all, fields(chunks = chunks.len()))]
    pub async fn index_chunks(&self, chunks: &[Chunk]) -> Result<(), IndexingError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.vector_store.add(chunks, &embeddings).await?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("text extraction: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
}

#[derive(Debug, thiserror::Error)]
pub enum IndexingError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
}
