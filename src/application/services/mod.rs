mod extraction_service;
mod ingestion_service;
mod qa_service;
mod upload_service;

pub use extraction_service::{
    ExtractionService, create_structured_chunk, format_extraction_as_text, parse_shipment_json,
};
pub use ingestion_service::{IndexingError, IngestionError, IngestionService};
pub use qa_service::{
    EMPTY_INDEX_ANSWER, GENERATION_ERROR_ANSWER, NOT_FOUND_ANSWER, QaService, SAFETY_REFUSAL,
    confidence_score, format_context, is_unsafe,
};
pub use upload_service::{ExtractionSummary, UploadReport, UploadService, UploadedFile};
