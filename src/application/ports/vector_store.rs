use async_trait::async_trait;

use super::{SearchResult, VectorStoreError};
use crate::domain::{Chunk, Embedding};

/// Parameters of a maximal-marginal-relevance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmrParams {
    /// Number of results returned.
    pub k: usize,
    /// Number of nearest candidates considered before diversification.
    pub fetch_k: usize,
    /// 1.0 ranks purely by relevance, 0.0 purely by diversity.
    pub lambda_mult: f32,
}

/// Insert-only chunk index.
///
/// Callers serialize `add` calls; the index is created on first insertion.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn add(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    async fn is_empty(&self) -> Result<bool, VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn search_mmr(
        &self,
        embedding: &Embedding,
        params: MmrParams,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;
}
