use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter, VectorStore};
use crate::application::services::{
    ExtractionService, IngestionService, QaService, UploadService,
};

pub struct AppState<F, L, V, T: ?Sized>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
    T: TextSplitter,
{
    pub ingestion_service: Arc<IngestionService<F, V, T>>,
    pub extraction_service: Arc<ExtractionService<L>>,
    pub qa_service: Arc<QaService<L, V>>,
    pub upload_service: Arc<UploadService<F, L, V, T>>,
}

impl<F, L, V, T: ?Sized> AppState<F, L, V, T>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
    T: TextSplitter,
{
    /// Builds the upload service from the ingestion and extraction services it drives.
    pub fn new(
        ingestion_service: Arc<IngestionService<F, V, T>>,
        extraction_service: Arc<ExtractionService<L>>,
        qa_service: Arc<QaService<L, V>>,
    ) -> Self {
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&ingestion_service),
            Arc::clone(&extraction_service),
        ));
        Self {
            ingestion_service,
            extraction_service,
            qa_service,
            upload_service,
        }
    }
}

impl<F, L, V, T: ?Sized> Clone for AppState<F, L, V, T>
where
    F: FileLoader,
    L: LlmClient,
    V: VectorStore,
    T: TextSplitter,
{
    fn clone(&self) -> Self {
        Self {
            ingestion_service: Arc::clone(&self.ingestion_service),
            extraction_service: Arc::clone(&self.extraction_service),
            qa_service: Arc::clone(&self.qa_service),
            upload_service: Arc::clone(&self.upload_service),
        }
    }
}
