//! Retriever that reports its results to the tracker

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::Result;
use crate::indexing::Chunk;
use crate::retrieval::{RelevantChunk, Retriever};
use crate::tracker::RagTracker;

/// Delegates to another retriever and records every relevant chunk
pub struct ObservedRetriever {
    inner: Arc<dyn Retriever>,
    tracker: RagTracker,
}

impl ObservedRetriever {
    pub fn new(inner: Arc<dyn Retriever>, tracker: RagTracker) -> Self {
        Self { inner, tracker }
    }

    fn record(&self, chunks: &[RelevantChunk]) {
        for chunk in chunks {
            self.tracker
                .add_relevant_chunk(chunk.key(), chunk.text.clone(), chunk.score);
        }
    }
}

#[async_trait]
impl Retriever for ObservedRetriever {
    async fn find_relevant_chunks(
        &self,
        question: &str,
        max_results: usize,
    ) -> Result<Vec<RelevantChunk>> {
        let chunks = self.inner.find_relevant_chunks(question, max_results).await?;
        self.record(&chunks);
        Ok(chunks)
    }

    async fn find_relevant_chunks_by_vector(
        &self,
        vector: &[f32],
        max_results: usize,
    ) -> Result<Vec<RelevantChunk>> {
        let chunks = self
            .inner
            .find_relevant_chunks_by_vector(vector, max_results)
            .await?;
        self.record(&chunks);
        Ok(chunks)
    }

    async fn get_chunk(&self, document_id: &str, chunk_id: usize) -> Option<Chunk> {
        self.inner.get_chunk(document_id, chunk_id).await
    }

    async fn chunks(&self) -> Vec<Chunk> {
        self.inner.chunks().await
    }
}
