//! Embedding: text to vectors
//!
//! The content store only depends on the [`Embedder`] trait; Ollama's
//! `nomic-embed-text` is the default implementation.

use async_trait::async_trait;

use crate::errors::{RagError, Result};
use crate::ollama::OllamaAccess;

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Turns text into embedding vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::OllamaApiError("No embedding returned".to_string()))
    }

    /// Embed multiple texts, one vector per text in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifies the embedding space, backups only load into a matching store
    fn identifier(&self) -> String;
}

/// Embedder using the Ollama `/api/embed` endpoint
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    access: OllamaAccess,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(access: OllamaAccess) -> Self {
        Self::with_model(access, DEFAULT_EMBEDDING_MODEL)
    }

    pub fn with_model(access: OllamaAccess, model: impl Into<String>) -> Self {
        Self {
            access,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.access.embed(&self.model, texts).await
    }

    fn identifier(&self) -> String {
        format!("ollama:{}", self.model)
    }
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
