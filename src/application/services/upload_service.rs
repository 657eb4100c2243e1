use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter, VectorStore};

use super::extraction_service::create_structured_chunk;
use super::{ExtractionService, IngestionService};

/// One file received in a batch upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub filename: String,
    pub text_chunks: usize,
    pub structured_data_extracted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReport {
    pub message: String,
    pub errors: Vec<String>,
    pub extractions: Vec<ExtractionSummary>,
}

/// Batch ingestion: chunk, index, extract and index the structured record
/// for each file in turn.
pub struct UploadService<F, L, V, T: ?Sized>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
    T: TextSplitter,
{
    ingestion_service: Arc<IngestionService<F, V, T>>,
    extraction_service: Arc<ExtractionService<L>>,
}

impl<F, L, V, T: ?Sized> UploadService<F, L, V, T>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
    T: TextSplitter,
{
    pub fn new(
        ingestion_service: Arc<IngestionService<F, V, T>>,
        extraction_service: Arc<ExtractionService<L>>,
    ) -> Self {
        Self {
            ingestion_service,
            extraction_service,
        }
    }

    /// Never fails as a whole: per-file failures are collected in `errors`.
    #[tracing::instrument(skip_all, fields(files = files.len()))]
    pub async fn upload(&self, files: Vec<UploadedFile>) -> UploadReport {
        let mut processed = 0usize;
        let mut errors = Vec::new();
        let mut extractions = Vec::new();

        for file in files {
            let filename = file.filename.as_str();

            let chunks = match self
                .ingestion_service
                .process_file(&file.data, filename)
                .await
            {
                Ok(chunks) => chunks,
                Err(e) => {
                    let message = format!("Error processing {filename}: {e}");
                    tracing::error!(filename, error = %e, "Document processing failed");
                    errors.push(message);
                    continue;
                }
            };

            if chunks.is_empty() {
                tracing::warn!(filename, "No text extracted");
                errors.push(format!("No text extracted from {filename}"));
                continue;
            }

            if let Err(e) = self.ingestion_service.index_chunks(&chunks).await {
                tracing::error!(filename, error = %e, "Indexing text chunks failed");
                errors.push(format!("Error processing {filename}: {e}"));
                continue;
            }
            tracing::info!(filename, chunks = chunks.len(), "Text chunks stored");

            let full_text = chunks
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let extraction = self.extraction_service.extract(&full_text, filename).await;
            let structured_chunk = create_structured_chunk(&extraction, filename);

            let summary = match self
                .ingestion_service
                .index_chunks(std::slice::from_ref(&structured_chunk))
                .await
            {
                Ok(()) => ExtractionSummary {
                    filename: filename.to_string(),
                    text_chunks: chunks.len(),
                    structured_data_extracted: true,
                    reference_id: extraction.data.reference_id.clone(),
                    error: None,
                },
                Err(e) => {
                    tracing::error!(filename, error = %e, "Indexing structured data failed");
                    ExtractionSummary {
                        filename: filename.to_string(),
                        text_chunks: chunks.len(),
                        structured_data_extracted: false,
                        reference_id: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            extractions.push(summary);

            processed += 1;
        }

        UploadReport {
            message: format!("Successfully processed {processed} documents."),
            errors,
            extractions,
        }
    }
}
