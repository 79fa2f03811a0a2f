//! Retrieval: finding the chunks that relate to a question
//!
//! - Retriever: similarity search over the content store
//! - Observed retriever: records what was found for the tracker
//! - Strategies: turn relevant chunks into the context for an answer

pub mod observed;
pub mod output;
pub mod strategies;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::indexing::{chunk_key, Chunk};

pub use observed::ObservedRetriever;
pub use output::{RetrievalOutput, RetrievalOutputItem};
pub use strategies::{
    DocumentRetrievalStrategy, RetrievalStrategy, StrategyKind, TopNRetrievalStrategy,
    WindowRetrievalStrategy,
};

/// Chunk returned by a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevantChunk {
    pub document_id: String,
    pub chunk_id: usize,
    pub total_chunks: usize,
    pub text: String,
    pub score: f32,
}

impl RelevantChunk {
    pub fn from_chunk(chunk: &Chunk, score: f32) -> Self {
        Self {
            document_id: chunk.document_id.clone(),
            chunk_id: chunk.chunk_id,
            total_chunks: chunk.total_chunks,
            text: chunk.text.clone(),
            score,
        }
    }

    pub fn key(&self) -> String {
        chunk_key(&self.document_id, self.chunk_id)
    }
}

/// Similarity search and chunk lookup
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Embed the question and return at most `max_results` chunks, best first
    async fn find_relevant_chunks(&self, question: &str, max_results: usize)
        -> Result<Vec<RelevantChunk>>;

    /// Same as [`Retriever::find_relevant_chunks`] for an already embedded question
    async fn find_relevant_chunks_by_vector(
        &self,
        vector: &[f32],
        max_results: usize,
    ) -> Result<Vec<RelevantChunk>>;

    /// Look up one chunk
    async fn get_chunk(&self, document_id: &str, chunk_id: usize) -> Option<Chunk>;

    /// Every stored chunk in key order
    async fn chunks(&self) -> Vec<Chunk>;
}
