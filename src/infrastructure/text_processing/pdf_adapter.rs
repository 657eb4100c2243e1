use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts PDF text page by page, prefixing each page with a `### Page N` marker.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
        pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))
    }

    /// Page numbers follow the page order of the file, including pages that
    /// produced no text and are therefore left out.
    pub fn render_pages<S: AsRef<str>>(pages: &[S]) -> String {
        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            let sanitized = sanitize_extracted_text(page.as_ref());
            if sanitized.is_empty() {
                continue;
            }
            text.push_str(&format!("\n\n### Page {}\n\n", index + 1));
            text.push_str(&sanitized);
        }
        text
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.to_string(),
            ));
        }

        let bytes = data.to_vec();
        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&bytes)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = Self::render_pages(&pages);
        tracing::info!(
            page_count = pages.len(),
            chars = text.len(),
            "PDF text extraction complete"
        );

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
