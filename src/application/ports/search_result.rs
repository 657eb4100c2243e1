use crate::domain::Chunk;

/// A retrieved chunk with its cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: Chunk,
    pub score: f32,
}
