//! Content store: chunks and their embeddings

pub mod backup;
pub mod internal;

use async_trait::async_trait;

use crate::errors::Result;
use crate::indexing::Chunk;

pub use backup::{BackupMetadata, StoredChunk};
pub use internal::InternalContentStore;

/// Accepts chunks from the indexing service
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Embed and store chunks, replacing chunks with the same key
    async fn store(&self, chunks: Vec<Chunk>) -> Result<()>;

    /// Number of stored chunks
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
