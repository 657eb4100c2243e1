use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved `chunk_id` for the chunk carrying a document's extracted shipment record.
pub const STRUCTURED_DATA_CHUNK_ID: u32 = 9999;

/// Section label used when a chunk carries no section marker.
pub const DEFAULT_SECTION_NAME: &str = "General";

const STRUCTURED_DATA_SECTION: &str = "Extracted Data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub filename: String,
    #[serde(default)]
    pub page_number: Option<u32>,
    pub chunk_id: u32,
    pub source: String,
    #[serde(default)]
    pub chunk_type: ChunkType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    #[default]
    Text,
    StructuredData,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Text => "text",
            ChunkType::StructuredData => "structured_data",
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChunkMetadata {
    pub fn text(filename: &str, chunk_id: u32, section: &str, page_number: Option<u32>) -> Self {
        Self {
            filename: filename.to_string(),
            page_number,
            chunk_id,
            source: format!("{filename} - {section}"),
            chunk_type: ChunkType::Text,
        }
    }

    pub fn structured_data(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            page_number: None,
            chunk_id: STRUCTURED_DATA_CHUNK_ID,
            source: format!("{filename} - {STRUCTURED_DATA_SECTION}"),
            chunk_type: ChunkType::StructuredData,
        }
    }

    /// Section part of `source`, i.e. what follows `"{filename} - "`.
    pub fn section(&self) -> &str {
        self.source
            .strip_prefix(self.filename.as_str())
            .and_then(|rest| rest.strip_prefix(" - "))
            .unwrap_or(self.source.as_str())
    }
}

impl Chunk {
    pub fn new(text: String, metadata: ChunkMetadata) -> Self {
        Self { text, metadata }
    }
}
