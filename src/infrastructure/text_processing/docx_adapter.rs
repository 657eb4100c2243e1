use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const DOCUMENT_XML: &str = "word/document.xml";

/// Reads the body paragraphs of a `.docx` package.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("invalid DOCX archive: {e}")))?;
        let mut entry = archive.by_name(DOCUMENT_XML).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_XML}: {e}"))
        })?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        Ok(xml)
    }
}

/// Text of each top-level `<w:p>` element in document order; empty
/// paragraphs are kept as empty strings.
///
/// Paragraphs nested inside a text box become lines of the paragraph that
/// anchors them.
pub fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("malformed {DOCUMENT_XML}: {e}")))?;

        match event {
            Event::Start(ref e) => match e.name().as_ref() {
                b"w:p" => {
                    if paragraph_depth > 0 {
                        break_line(&mut current);
                    }
                    paragraph_depth += 1;
                }
                b"w:r" => run_depth += 1,
                b"w:t" if run_depth > 0 => in_text = true,
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                b"w:tab" if run_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::Text(ref e) if in_text => {
                let text = e.unescape().map_err(|err| {
                    FileLoaderError::ExtractionFailed(format!("malformed {DOCUMENT_XML}: {err}"))
                })?;
                current.push_str(&text);
            }
            Event::CData(ref e) if in_text => {
                current.push_str(&String::from_utf8_lossy(e));
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    } else {
                        break_line(&mut current);
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.to_string(),
            ));
        }

        let xml = Self::read_document_xml(data)?;
        let paragraphs = paragraphs_from_xml(&xml)?;
        tracing::debug!(paragraphs = paragraphs.len(), "DOCX text extraction complete");

        Ok(paragraphs.join("\n"))
    }
}
