use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use logidoc::application::ports::{Embedder, MmrParams, TextSplitter};
use logidoc::application::services::{
    EMPTY_INDEX_ANSWER, ExtractionService, IngestionService, QaService,
};
use logidoc::infrastructure::llm::{HashingEmbedder, MockLlmClient};
use logidoc::infrastructure::observability::REQUEST_ID_HEADER;
use logidoc::infrastructure::persistence::InMemoryVectorStore;
use logidoc::infrastructure::text_processing::{CompositeFileLoader, SectionChunker};
use logidoc::presentation::{AppState, create_router};

const BOUNDARY: &str = "logidoc-test-boundary";
const LLM_REPLY: &str = r#"{"reference_id": "LD-4821", "carrier": {"carrier_name": "Acme Trucking"}}"#;
const TENDER: &str = "Load LD-4821\nCarrier Details\nAcme Trucking\nPickup\nDallas TX, March 3";

fn app() -> Router {
    let embedder: Arc<dyn Embedder> = Arc::new(HashingEmbedder::new(128));
    let splitter: Arc<dyn TextSplitter> =
        Arc::new(SectionChunker::with_bounds(2000, 200).unwrap());
    let llm = Arc::new(MockLlmClient::with_response(LLM_REPLY));
    let store = Arc::new(InMemoryVectorStore::new());

    let ingestion = Arc::new(IngestionService::new(
        Arc::new(CompositeFileLoader::with_defaults()),
        Arc::clone(&embedder),
        Arc::clone(&store),
        splitter,
    ));
    let extraction = Arc::new(ExtractionService::new(Arc::clone(&llm)));
    let qa = Arc::new(QaService::new(
        embedder,
        llm,
        store,
        MmrParams {
            k: 4,
            fetch_k: 12,
            lambda_mult: 0.7,
        },
    ));

    create_router(AppState::new(ingestion, extraction, qa), 1024 * 1024)
}

fn multipart_body(files: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (filename, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn multipart_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn ask_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_status_routes_when_requested_then_report_service_state() {
    for (uri, expected) in [("/", "running"), ("/health", "healthy"), ("/ping", "pong")] {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(json_body(response).await, json!({ "status": expected }));
    }
}

#[tokio::test]
async fn given_empty_index_when_asking_then_returns_no_information_answer() {
    let response = app()
        .oneshot(ask_request(json!({ "question": "When is pickup?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["answer"], EMPTY_INDEX_ANSWER);
    assert_eq!(body["confidence_score"], 0.0);
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn given_text_and_csv_files_when_uploading_then_reports_per_file_outcome() {
    let body = multipart_body(&[("tender.txt", TENDER), ("data.csv", "a,b,c")]);

    let response = app()
        .oneshot(multipart_request("/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = json_body(response).await;
    assert_eq!(report["message"], "Successfully processed 1 documents.");
    assert_eq!(
        report["errors"],
        json!(["Error processing data.csv: Unsupported file type: .csv"])
    );
    assert_eq!(
        report["extractions"],
        json!([{
            "filename": "tender.txt",
            "text_chunks": 3,
            "structured_data_extracted": true,
            "reference_id": "LD-4821"
        }])
    );
}

#[tokio::test]
async fn given_uploaded_document_when_asking_then_answers_with_sources() {
    let app = app();
    let upload = app
        .clone()
        .oneshot(multipart_request(
            "/upload",
            multipart_body(&[("tender.txt", TENDER)]),
        ))
        .await
        .unwrap();
    assert_eq!(upload.status(), StatusCode::OK);

    let response = app
        .oneshot(ask_request(json!({
            "question": "Who is the carrier?",
            "chat_history": [
                { "role": "human", "content": "Hi" },
                { "role": "ai", "content": "Hello" }
            ]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["answer"], LLM_REPLY);
    let sources = body["sources"].as_array().unwrap();
    assert!(!sources.is_empty() && sources.len() <= 4);
    assert!(sources.iter().all(|s| s["metadata"]["filename"] == "tender.txt"));
}

#[tokio::test]
async fn given_csv_file_when_extracting_then_returns_unsupported_media_type() {
    let response = app()
        .oneshot(multipart_request(
            "/extract",
            multipart_body(&[("data.csv", "a,b,c")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Unsupported file type: .csv" })
    );
}

#[tokio::test]
async fn given_text_file_when_extracting_then_returns_shipment_record() {
    let response = app()
        .oneshot(multipart_request(
            "/extract",
            multipart_body(&[("tender.txt", TENDER)]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["document_id"], "tender.txt");
    assert_eq!(body["data"]["reference_id"], "LD-4821");
    assert_eq!(body["data"]["carrier"]["carrier_name"], "Acme Trucking");
}

#[tokio::test]
async fn given_multipart_without_files_when_uploading_then_returns_bad_request() {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );

    let response = app()
        .oneshot(multipart_request("/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "No file uploaded" })
    );
}

#[tokio::test]
async fn given_caller_request_id_when_requesting_then_echoes_it() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "trace-4821")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-4821");
}
