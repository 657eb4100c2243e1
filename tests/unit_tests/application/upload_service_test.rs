use std::sync::Arc;

use logidoc::application::ports::{Embedder, LlmClient, TextSplitter, VectorStore};
use logidoc::application::services::{
    ExtractionService, ExtractionSummary, IngestionService, UploadReport, UploadService,
    UploadedFile,
};
use logidoc::infrastructure::llm::{HashingEmbedder, MockLlmClient};
use logidoc::infrastructure::persistence::InMemoryVectorStore;
use logidoc::infrastructure::text_processing::{CompositeFileLoader, SectionChunker};

type Service<L> = UploadService<CompositeFileLoader, L, InMemoryVectorStore, dyn TextSplitter>;

fn service<L: LlmClient>(llm: L, store: Arc<InMemoryVectorStore>) -> Service<L> {
    let embedder: Arc<dyn Embedder> = Arc::new(HashingEmbedder::new(64));
    let splitter: Arc<dyn TextSplitter> = Arc::new(SectionChunker::with_bounds(2000, 200).unwrap());
    let ingestion = Arc::new(IngestionService::new(
        Arc::new(CompositeFileLoader::with_defaults()),
        embedder,
        store,
        splitter,
    ));
    UploadService::new(ingestion, Arc::new(ExtractionService::new(Arc::new(llm))))
}

fn file(filename: &str, data: &str) -> UploadedFile {
    UploadedFile {
        filename: filename.to_string(),
        data: data.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn given_csv_file_when_uploading_then_reports_error_and_processes_nothing() {
    let store = Arc::new(InMemoryVectorStore::new());
    let service = service(MockLlmClient::with_response("{}"), Arc::clone(&store));

    let report = service.upload(vec![file("data.csv", "a,b,c")]).await;

    assert_eq!(report.message, "Successfully processed 0 documents.");
    assert_eq!(
        report.errors,
        ["Error processing data.csv: Unsupported file type: .csv"]
    );
    assert!(report.extractions.is_empty());
    assert!(store.is_empty().await.unwrap());
}

#[tokio::test]
async fn given_text_file_when_uploading_then_indexes_chunks_and_structured_record() {
    let store = Arc::new(InMemoryVectorStore::new());
    let llm = MockLlmClient::with_response(r#"{"reference_id": "LD-4821"}"#);
    let service = service(llm, Arc::clone(&store));

    let report = service
        .upload(vec![file(
            "tender.txt",
            "Load LD-4821\nCarrier Details\nAcme Trucking\nPickup\nDallas TX",
        )])
        .await;

    assert_eq!(report.message, "Successfully processed 1 documents.");
    assert!(report.errors.is_empty());
    let summary = &report.extractions[0];
    assert_eq!(summary.filename, "tender.txt");
    assert_eq!(summary.text_chunks, 3);
    assert!(summary.structured_data_extracted);
    assert_eq!(summary.reference_id.as_deref(), Some("LD-4821"));
    assert_eq!(summary.error, None);
    assert_eq!(store.len().await, 4);
}

#[tokio::test]
async fn given_mixed_batch_when_uploading_then_continues_past_failures() {
    let store = Arc::new(InMemoryVectorStore::new());
    let service = service(MockLlmClient::failing(), Arc::clone(&store));

    let report = service
        .upload(vec![
            file("blank.txt", "   \n "),
            file("data.csv", "a,b"),
            file("notes.txt", "Pickup\nDallas TX"),
        ])
        .await;

    assert_eq!(report.message, "Successfully processed 1 documents.");
    assert_eq!(
        report.errors,
        [
            "No text extracted from blank.txt",
            "Error processing data.csv: Unsupported file type: .csv",
        ]
    );
    assert_eq!(report.extractions.len(), 1);
    assert_eq!(report.extractions[0].reference_id, None);
    assert!(report.extractions[0].structured_data_extracted);
}

#[test]
fn given_summary_without_optional_fields_when_serializing_then_omits_them() {
    let report = UploadReport {
        message: "Successfully processed 1 documents.".to_string(),
        errors: Vec::new(),
        extractions: vec![ExtractionSummary {
            filename: "tender.txt".to_string(),
            text_chunks: 2,
            structured_data_extracted: true,
            reference_id: None,
            error: None,
        }],
    };

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(
        json["extractions"][0],
        serde_json::json!({
            "filename": "tender.txt",
            "text_chunks": 2,
            "structured_data_extracted": true
        })
    );
}
