//! Retrieval strategies build the answer context from relevant chunks

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::retrieval::{RetrievalOutput, RetrievalOutputItem, Retriever};

/// Turns a question into context for the answer generator
#[async_trait]
pub trait RetrievalStrategy: Send + Sync {
    async fn retrieve(&self, question: &str, max_results: usize) -> Result<RetrievalOutput>;

    fn name(&self) -> &'static str;
}

/// Selectable strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// The N most relevant chunks
    TopN,
    /// Relevant chunks with their neighbouring chunks
    Window,
    /// Complete documents of the relevant chunks
    Document,
}

/// Build the strategy selected in the configuration
pub fn create_strategy(
    kind: StrategyKind,
    retriever: Arc<dyn Retriever>,
    window_size: usize,
) -> Arc<dyn RetrievalStrategy> {
    match kind {
        StrategyKind::TopN => Arc::new(TopNRetrievalStrategy::new(retriever)),
        StrategyKind::Window => Arc::new(WindowRetrievalStrategy::with_window_size(
            retriever,
            window_size,
        )),
        StrategyKind::Document => Arc::new(DocumentRetrievalStrategy::new(retriever)),
    }
}

/// One context item per relevant chunk
pub struct TopNRetrievalStrategy {
    retriever: Arc<dyn Retriever>,
}

impl TopNRetrievalStrategy {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl RetrievalStrategy for TopNRetrievalStrategy {
    async fn retrieve(&self, question: &str, max_results: usize) -> Result<RetrievalOutput> {
        let chunks = self
            .retriever
            .find_relevant_chunks(question, max_results)
            .await?;

        Ok(RetrievalOutput::new(
            chunks
                .into_iter()
                .map(|chunk| RetrievalOutputItem {
                    document_id: chunk.document_id,
                    chunk_id: chunk.chunk_id,
                    text: chunk.text,
                })
                .collect(),
        ))
    }

    fn name(&self) -> &'static str {
        "top-n"
    }
}

/// Each relevant chunk extended with `window_size` chunks on both sides
pub struct WindowRetrievalStrategy {
    retriever: Arc<dyn Retriever>,
    window_size: usize,
}

impl WindowRetrievalStrategy {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self::with_window_size(retriever, 1)
    }

    pub fn with_window_size(retriever: Arc<dyn Retriever>, window_size: usize) -> Self {
        Self {
            retriever,
            window_size,
        }
    }
}

#[async_trait]
impl RetrievalStrategy for WindowRetrievalStrategy {
    async fn retrieve(&self, question: &str, max_results: usize) -> Result<RetrievalOutput> {
        let chunks = self
            .retriever
            .find_relevant_chunks(question, max_results)
            .await?;
        let mut items = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let first = chunk.chunk_id.saturating_sub(self.window_size);
            let last = (chunk.chunk_id + self.window_size).min(chunk.total_chunks.saturating_sub(1));

            let mut texts = Vec::new();
            for chunk_id in first..=last {
                if chunk_id == chunk.chunk_id {
                    texts.push(chunk.text.clone());
                } else if let Some(neighbour) =
                    self.retriever.get_chunk(&chunk.document_id, chunk_id).await
                {
                    texts.push(neighbour.text);
                }
            }

            debug!(
                document_id = %chunk.document_id,
                chunk_id = chunk.chunk_id,
                window = texts.len(),
                "Expanded chunk window"
            );

            items.push(RetrievalOutputItem {
                document_id: chunk.document_id,
                chunk_id: chunk.chunk_id,
                text: texts.join(" "),
            });
        }

        Ok(RetrievalOutput::new(items))
    }

    fn name(&self) -> &'static str {
        "window"
    }
}

/// One context item per distinct document, holding the whole document text
pub struct DocumentRetrievalStrategy {
    retriever: Arc<dyn Retriever>,
}

impl DocumentRetrievalStrategy {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl RetrievalStrategy for DocumentRetrievalStrategy {
    async fn retrieve(&self, question: &str, max_results: usize) -> Result<RetrievalOutput> {
        let chunks = self
            .retriever
            .find_relevant_chunks(question, max_results)
            .await?;
        let mut items: Vec<RetrievalOutputItem> = Vec::new();

        for chunk in chunks {
            if items.iter().any(|item| item.document_id == chunk.document_id) {
                continue;
            }

            let mut texts = Vec::with_capacity(chunk.total_chunks);
            for chunk_id in 0..chunk.total_chunks {
                if let Some(part) = self.retriever.get_chunk(&chunk.document_id, chunk_id).await {
                    texts.push(part.text);
                }
            }

            items.push(RetrievalOutputItem {
                document_id: chunk.document_id,
                chunk_id: chunk.chunk_id,
                text: texts.join(" "),
            });
        }

        Ok(RetrievalOutput::new(items))
    }

    fn name(&self) -> &'static str {
        "document"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::Chunk;
    use crate::retrieval::RelevantChunk;

    /// Returns a fixed ranking regardless of the question
    struct StaticRetriever {
        chunks: Vec<Chunk>,
        ranking: Vec<(String, usize, f32)>,
    }

    impl StaticRetriever {
        fn new(ranking: &[(&str, usize, f32)]) -> Self {
            let mut chunks = Vec::new();
            for (document_id, total) in [("a", 4), ("b", 2)] {
                for chunk_id in 0..total {
                    chunks.push(Chunk {
                        document_id: document_id.to_string(),
                        chunk_id,
                        total_chunks: total,
                        text: format!("{}{}", document_id, chunk_id),
                        properties: Default::default(),
                    });
                }
            }

            Self {
                chunks,
                ranking: ranking
                    .iter()
                    .map(|(d, c, s)| (d.to_string(), *c, *s))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Retriever for StaticRetriever {
        async fn find_relevant_chunks(
            &self,
            _question: &str,
            max_results: usize,
        ) -> Result<Vec<RelevantChunk>> {
            self.find_relevant_chunks_by_vector(&[], max_results).await
        }

        async fn find_relevant_chunks_by_vector(
            &self,
            _vector: &[f32],
            max_results: usize,
        ) -> Result<Vec<RelevantChunk>> {
            let mut found = Vec::new();
            for (document_id, chunk_id, score) in self.ranking.iter().take(max_results) {
                if let Some(chunk) = self.get_chunk(document_id, *chunk_id).await {
                    found.push(RelevantChunk::from_chunk(&chunk, *score));
                }
            }
            Ok(found)
        }

        async fn get_chunk(&self, document_id: &str, chunk_id: usize) -> Option<Chunk> {
            self.chunks
                .iter()
                .find(|c| c.document_id == document_id && c.chunk_id == chunk_id)
                .cloned()
        }

        async fn chunks(&self) -> Vec<Chunk> {
            self.chunks.clone()
        }
    }

    #[tokio::test]
    async fn test_top_n_returns_relevant_chunks() {
        let retriever = Arc::new(StaticRetriever::new(&[("a", 2, 0.9), ("b", 1, 0.8), ("a", 0, 0.1)]));
        let strategy = TopNRetrievalStrategy::new(retriever);

        let output = strategy.retrieve("q", 2).await.unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.construct_context(), "a2 b1");
    }

    #[tokio::test]
    async fn test_window_includes_neighbours() {
        let retriever = Arc::new(StaticRetriever::new(&[("a", 2, 0.9)]));
        let strategy = WindowRetrievalStrategy::new(retriever);

        let output = strategy.retrieve("q", 1).await.unwrap();
        assert_eq!(output.items[0].text, "a1 a2 a3");
        assert_eq!(output.items[0].chunk_id, 2);
    }

    #[tokio::test]
    async fn test_window_clamps_to_document_bounds() {
        let retriever = Arc::new(StaticRetriever::new(&[("a", 0, 0.9), ("b", 1, 0.5)]));
        let strategy = WindowRetrievalStrategy::with_window_size(retriever, 2);

        let output = strategy.retrieve("q", 2).await.unwrap();
        assert_eq!(output.items[0].text, "a0 a1 a2");
        assert_eq!(output.items[1].text, "b0 b1");
    }

    #[tokio::test]
    async fn test_document_strategy_deduplicates_documents() {
        let retriever = Arc::new(StaticRetriever::new(&[("b", 1, 0.9), ("a", 3, 0.8), ("b", 0, 0.7)]));
        let strategy = DocumentRetrievalStrategy::new(retriever);

        let output = strategy.retrieve("q", 3).await.unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.items[0].text, "b0 b1");
        assert_eq!(output.items[1].text, "a0 a1 a2 a3");
    }

    #[tokio::test]
    async fn test_create_strategy_names() {
        let retriever: Arc<dyn Retriever> = Arc::new(StaticRetriever::new(&[]));
        assert_eq!(create_strategy(StrategyKind::TopN, retriever.clone(), 1).name(), "top-n");
        assert_eq!(create_strategy(StrategyKind::Window, retriever.clone(), 1).name(), "window");
        assert_eq!(create_strategy(StrategyKind::Document, retriever, 1).name(), "document");
    }

    #[tokio::test]
    async fn test_observed_retriever_records_chunks() {
        use crate::retrieval::ObservedRetriever;
        use crate::tracker::RagTracker;

        let tracker = RagTracker::new();
        let observed = Arc::new(ObservedRetriever::new(
            Arc::new(StaticRetriever::new(&[("a", 1, 0.9), ("b", 0, 0.4)])),
            tracker.clone(),
        ));
        let strategy = TopNRetrievalStrategy::new(observed);

        strategy.retrieve("q", 2).await.unwrap();

        let observer = tracker.observer();
        let keys: Vec<_> = observer.relevant_chunks.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["a_1", "b_0"]);
    }
}
