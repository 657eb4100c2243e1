use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::application::ports::{MmrParams, SearchResult, VectorStore, VectorStoreError};
use crate::domain::{Chunk, Embedding};

struct Entry {
    chunk: Chunk,
    embedding: Embedding,
}

struct Index {
    dimension: usize,
    entries: Vec<Entry>,
}

/// Process-local, insert-only index ranked by cosine similarity.
///
/// The index does not exist until the first `add`, which fixes its dimension.
#[derive(Default)]
pub struct InMemoryVectorStore {
    index: RwLock<Option<Index>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.index
            .read()
            .await
            .as_ref()
            .map_or(0, |index| index.entries.len())
    }
}

fn check_dimension(expected: usize, embedding: &Embedding) -> Result<(), VectorStoreError> {
    if embedding.dimensions() != expected {
        return Err(VectorStoreError::DimensionMismatch {
            expected,
            actual: embedding.dimensions(),
        });
    }
    Ok(())
}

/// Entries ordered by descending similarity, truncated to `limit`.
fn nearest<'a>(index: &'a Index, query: &Embedding, limit: usize) -> Vec<(&'a Entry, f32)> {
    let mut scored: Vec<(&Entry, f32)> = index
        .entries
        .iter()
        .map(|entry| (entry, query.cosine_similarity(&entry.embedding)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    async fn add(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::InsertFailed(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        let Some(first) = embeddings.first() else {
            return Ok(());
        };

        let mut guard = self.index.write().await;
        let index = guard.get_or_insert_with(|| {
            info!(dimension = first.dimensions(), "Creating vector index");
            Index {
                dimension: first.dimensions(),
                entries: Vec::new(),
            }
        });

        for embedding in embeddings {
            check_dimension(index.dimension, embedding)?;
        }

        index.entries.extend(
            chunks
                .iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| Entry {
                    chunk: chunk.clone(),
                    embedding: embedding.clone(),
                }),
        );
        info!(total = index.entries.len(), "Chunks indexed");

        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, VectorStoreError> {
        Ok(self
            .index
            .read()
            .await
            .as_ref()
            .is_none_or(|index| index.entries.is_empty()))
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let guard = self.index.read().await;
        let Some(index) = guard.as_ref() else {
            return Ok(Vec::new());
        };
        check_dimension(index.dimension, embedding)?;

        Ok(nearest(index, embedding, top_k)
            .into_iter()
            .map(|(entry, score)| SearchResult {
                chunk: entry.chunk.clone(),
                score,
            })
            .collect())
    }

    /// Greedy maximal marginal relevance over the `fetch_k` nearest entries:
    /// each step picks the candidate maximizing
    /// `lambda * sim(query, c) - (1 - lambda) * max sim(c, selected)`.
    #[instrument(skip(self, embedding))]
    async fn search_mmr(
        &self,
        embedding: &Embedding,
        params: MmrParams,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let guard = self.index.read().await;
        let Some(index) = guard.as_ref() else {
            return Ok(Vec::new());
        };
        check_dimension(index.dimension, embedding)?;

        let mut candidates = nearest(index, embedding, params.fetch_k.max(params.k));
        let mut selected: Vec<(&Entry, f32)> = Vec::with_capacity(params.k);

        while selected.len() < params.k && !candidates.is_empty() {
            let mut best = 0;
            let mut best_score = f32::NEG_INFINITY;
            for (i, (candidate, relevance)) in candidates.iter().enumerate() {
                let redundancy = selected
                    .iter()
                    .map(|(chosen, _)| candidate.embedding.cosine_similarity(&chosen.embedding))
                    .fold(f32::NEG_INFINITY, f32::max);
                let redundancy = if selected.is_empty() { 0.0 } else { redundancy };
                let score =
                    params.lambda_mult * relevance - (1.0 - params.lambda_mult) * redundancy;
                if score > best_score {
                    best = i;
                    best_score = score;
                }
            }
            selected.push(candidates.remove(best));
        }

        Ok(selected
            .into_iter()
            .map(|(entry, score)| SearchResult {
                chunk: entry.chunk.clone(),
                score,
            })
            .collect())
    }
}
