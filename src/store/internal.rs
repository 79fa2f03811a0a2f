//! In-memory content store
//!
//! Keeps every chunk with its embedding in a map and ranks all of them by
//! cosine similarity for each query. Suitable for the few hundred chunks of
//! a conference program; backups make re-embedding unnecessary between runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::embedding::{cosine_similarity, Embedder};
use crate::errors::{RagError, Result};
use crate::indexing::{chunk_key, Chunk};
use crate::retrieval::{RelevantChunk, Retriever};
use crate::store::backup::{self, StoredChunk};
use crate::store::ContentStore;

/// Content store backed by an in-memory map
pub struct InternalContentStore {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<BTreeMap<String, StoredChunk>>,
}

impl InternalContentStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Write the store to `{dir}/{name}.json` and `{dir}/{name}-meta.json`
    pub async fn backup_to_disk(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let entries = self.entries.read().await;
        if entries.is_empty() {
            return Err(RagError::EmptyStore);
        }

        let chunks: Vec<StoredChunk> = entries.values().cloned().collect();
        let path = backup::write_backup(dir, name, &self.embedder.identifier(), &chunks)?;

        info!("Stored backup of {} chunks in {}", chunks.len(), path.display());
        Ok(path)
    }

    /// Replace the store contents with a backup, returns the number of chunks
    pub async fn load_from_disk(&self, dir: &Path, name: &str) -> Result<usize> {
        let (metadata, chunks) = backup::read_backup(dir, name, &self.embedder.identifier())?;

        let mut entries = self.entries.write().await;
        entries.clear();
        for stored in chunks {
            entries.insert(stored.chunk.key(), stored);
        }

        info!(
            "Loaded backup '{}' with {} chunks created at {}",
            metadata.name, metadata.chunk_count, metadata.created_at
        );
        Ok(entries.len())
    }
}

#[async_trait]
impl ContentStore for InternalContentStore {
    async fn store(&self, chunks: Vec<Chunk>) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::Generic(format!(
                "Embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let mut entries = self.entries.write().await;
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            debug!(key = %chunk.key(), dimension = embedding.len(), "Storing chunk");
            entries.insert(chunk.key(), StoredChunk { chunk, embedding });
        }

        Ok(())
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl Retriever for InternalContentStore {
    async fn find_relevant_chunks(
        &self,
        question: &str,
        max_results: usize,
    ) -> Result<Vec<RelevantChunk>> {
        let vector = self.embedder.embed(question).await?;
        self.find_relevant_chunks_by_vector(&vector, max_results).await
    }

    async fn find_relevant_chunks_by_vector(
        &self,
        vector: &[f32],
        max_results: usize,
    ) -> Result<Vec<RelevantChunk>> {
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &StoredChunk)> = entries
            .values()
            .map(|stored| (cosine_similarity(vector, &stored.embedding), stored))
            .collect();

        // NaN scores rank last; stable sort keeps key order for equal scores
        scored.sort_by(|a, b| {
            a.0.is_nan()
                .cmp(&b.0.is_nan())
                .then_with(|| b.0.total_cmp(&a.0))
        });

        Ok(scored
            .into_iter()
            .take(max_results)
            .map(|(score, stored)| RelevantChunk::from_chunk(&stored.chunk, score))
            .collect())
    }

    async fn get_chunk(&self, document_id: &str, chunk_id: usize) -> Option<Chunk> {
        self.entries
            .read()
            .await
            .get(&chunk_key(document_id, chunk_id))
            .map(|stored| stored.chunk.clone())
    }

    async fn chunks(&self) -> Vec<Chunk> {
        self.entries
            .read()
            .await
            .values()
            .map(|stored| stored.chunk.clone())
            .collect()
    }
}
