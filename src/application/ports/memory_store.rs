use async_trait::async_trait;

use crate::domain::{Embedding, MemoryRecord, RecalledMemory};

/// Vector index holding memory records keyed by their embeddings.
///
/// Consistency is whatever the hosted store provides; concurrent upserts
/// from independent requests are unordered relative to each other.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Creates the backing collection if absent. Returns true when created.
    async fn ensure_collection(&self, dimensions: u64) -> Result<bool, MemoryStoreError>;

    async fn upsert(
        &self,
        memory: &MemoryRecord,
        embedding: &Embedding,
    ) -> Result<(), MemoryStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RecalledMemory>, MemoryStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("vector store connection failed: {0}")]
    ConnectionFailed(String),
    #[error("collection creation failed: {0}")]
    CollectionCreationFailed(String),
    #[error("upsert failed: {0}")]
    UpsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
}
