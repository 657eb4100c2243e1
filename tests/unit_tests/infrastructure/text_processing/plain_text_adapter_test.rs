use logidoc::application::ports::{FileLoader, FileLoaderError};
use logidoc::domain::{ContentType, Document};
use logidoc::infrastructure::text_processing::PlainTextAdapter;

fn text_document() -> Document {
    Document::new("notes.txt".to_string(), ContentType::Text, 0)
}

#[tokio::test]
async fn given_utf8_with_bom_when_extracting_then_strips_bom() {
    let text = PlainTextAdapter::new()
        .extract_text("\u{feff}Pickup: Dallas".as_bytes(), &text_document())
        .await
        .unwrap();

    assert_eq!(text, "Pickup: Dallas");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_returns_extraction_failed() {
    let result = PlainTextAdapter::new()
        .extract_text(&[0x50, 0xff, 0xfe, 0x41], &text_document())
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_pdf_document_when_extracting_then_rejects_content_type() {
    let document = Document::new("ratecon.pdf".to_string(), ContentType::Pdf, 0);

    let result = PlainTextAdapter::new().extract_text(b"text", &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}
