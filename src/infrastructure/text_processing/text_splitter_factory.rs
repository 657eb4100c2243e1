use std::sync::Arc;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::presentation::config::{ChunkingSettings, ChunkingStrategy};

use super::{PlainChunker, SectionChunker};

pub struct TextSplitterFactory;

impl TextSplitterFactory {
    pub fn create(settings: &ChunkingSettings) -> Result<Arc<dyn TextSplitter>, TextSplitterError> {
        match settings.strategy {
            ChunkingStrategy::Sectioned => {
                let max_len = settings
                    .chunk_size
                    .saturating_mul(settings.grouped_size_multiplier);
                Ok(Arc::new(SectionChunker::with_bounds(
                    max_len,
                    settings.chunk_overlap,
                )?))
            }
            ChunkingStrategy::Plain => Ok(Arc::new(PlainChunker::new(
                settings.chunk_size,
                settings.chunk_overlap,
            )?)),
        }
    }
}
