#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("insert failed: {0}")]
    InsertFailed(String),
    #[error("dimension mismatch: index holds {expected}-dimensional vectors, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
