use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

use super::chunk_assembler::{ChunkAssembler, PageIndex, SectionFragment};
use super::recursive_character_splitter::RecursiveCharacterSplitter;
use super::section_grouper::SectionGrouper;
use super::structural_tagger::StructuralTagger;

/// Section-aware chunking: tag known headings, group related sections,
/// split each group to size and assemble numbered chunks.
pub struct SectionChunker {
    tagger: StructuralTagger,
    grouper: SectionGrouper,
    splitter: RecursiveCharacterSplitter,
}

impl SectionChunker {
    pub fn new(
        tagger: StructuralTagger,
        grouper: SectionGrouper,
        splitter: RecursiveCharacterSplitter,
    ) -> Self {
        Self {
            tagger,
            grouper,
            splitter,
        }
    }

    /// Default vocabulary and grouping table with the given bounds.
    pub fn with_bounds(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        Ok(Self::new(
            StructuralTagger::default(),
            SectionGrouper::default(),
            RecursiveCharacterSplitter::new(chunk_size, chunk_overlap)?,
        ))
    }

    pub fn chunk(&self, raw: &str, filename: &str) -> Vec<Chunk> {
        let tagged = self.tagger.tag(raw);
        let pages = PageIndex::from_text(&tagged);
        let groups = self.grouper.group(&tagged);

        let mut fragments = Vec::new();
        for group in groups.iter().filter(|g| !g.text.trim().is_empty()) {
            let section_name = group.section_name();
            for fragment in self.splitter.split(&group.text) {
                let leading_whitespace = fragment.text.len() - fragment.text.trim_start().len();
                let page_number = pages.page_at(group.offset + fragment.offset + leading_whitespace);
                fragments.push(SectionFragment {
                    section_name: section_name.map(str::to_string),
                    text: fragment.text,
                    page_number,
                });
            }
        }

        let fragment_count = fragments.len();
        let chunks = ChunkAssembler::new(filename).assemble(fragments);

        tracing::debug!(
            filename,
            groups = groups.len(),
            fragments = fragment_count,
            chunks = chunks.len(),
            "Section chunking complete"
        );

        chunks
    }
}

impl TextSplitter for SectionChunker {
    fn split(&self, text: &str, filename: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        Ok(self.chunk(text, filename))
    }
}
