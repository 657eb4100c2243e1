use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

use super::chunk_assembler::{ChunkAssembler, PageIndex, SectionFragment};
use super::recursive_character_splitter::RecursiveCharacterSplitter;

/// Splits the whole document with the recursive splitter, without tagging or grouping.
pub struct PlainChunker {
    splitter: RecursiveCharacterSplitter,
}

impl PlainChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        Ok(Self {
            splitter: RecursiveCharacterSplitter::new(chunk_size, chunk_overlap)?,
        })
    }
}

impl TextSplitter for PlainChunker {
    fn split(&self, text: &str, filename: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        let pages = PageIndex::from_text(text);
        let fragments = self.splitter.split(text).into_iter().map(|fragment| {
            let leading_whitespace = fragment.text.len() - fragment.text.trim_start().len();
            SectionFragment {
                section_name: None,
                page_number: pages.page_at(fragment.offset + leading_whitespace),
                text: fragment.text,
            }
        });

        Ok(ChunkAssembler::new(filename).assemble(fragments))
    }
}
