use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Chunk, ChunkMetadata, DEFAULT_SECTION_NAME, first_section_marker};

static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### Page (\d+)").unwrap());
static STANDALONE_PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### Page \d+[ \t]*$").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static REPEATED_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// One splitter fragment awaiting assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFragment {
    /// First section name of the group the fragment was cut from.
    pub section_name: Option<String>,
    pub text: String,
    pub page_number: Option<u32>,
}

/// Positions of `### Page N` markers in a document.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    markers: Vec<(usize, u32)>,
}

impl PageIndex {
    pub fn from_text(text: &str) -> Self {
        let markers = PAGE_MARKER
            .captures_iter(text)
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                let page = caps.get(1)?.as_str().parse().ok()?;
                Some((start, page))
            })
            .collect();
        Self { markers }
    }

    /// Page whose marker most recently starts at or before `offset`.
    pub fn page_at(&self, offset: usize) -> Option<u32> {
        let idx = self.markers.partition_point(|(start, _)| *start <= offset);
        idx.checked_sub(1).map(|i| self.markers[i].1)
    }
}

/// Cleans fragments of one document and numbers them as chunks.
pub struct ChunkAssembler {
    filename: String,
}

impl ChunkAssembler {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    /// Fragments that are empty after cleaning are dropped without consuming
    /// a `chunk_id`, so ids run from 0 without gaps.
    pub fn assemble<I>(&self, fragments: I) -> Vec<Chunk>
    where
        I: IntoIterator<Item = SectionFragment>,
    {
        let mut chunks = Vec::new();

        for fragment in fragments {
            let text = clean_fragment(&fragment.text);
            if text.is_empty() {
                continue;
            }

            let section = first_section_marker(&text)
                .map(str::to_string)
                .or(fragment.section_name)
                .unwrap_or_else(|| DEFAULT_SECTION_NAME.to_string());

            let chunk_id = chunks.len() as u32;
            let metadata =
                ChunkMetadata::text(&self.filename, chunk_id, &section, fragment.page_number);
            chunks.push(Chunk::new(text, metadata));
        }

        chunks
    }
}

/// Drops bare page-marker lines, collapses blank-line and space runs, trims.
pub fn clean_fragment(text: &str) -> String {
    let without_pages = STANDALONE_PAGE_MARKER.replace_all(text, "");
    let collapsed = EXCESS_NEWLINES.replace_all(&without_pages, "\n\n");
    REPEATED_SPACES
        .replace_all(&collapsed, " ")
        .trim()
        .to_string()
}
