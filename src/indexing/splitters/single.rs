//! Single-chunk splitter

use async_trait::async_trait;

use crate::errors::Result;
use crate::indexing::document::{Chunk, InputDocument};
use crate::indexing::splitters::Splitter;

/// Stores the complete text as one chunk
#[derive(Debug, Clone, Default)]
pub struct SingleChunkSplitter;

impl SingleChunkSplitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Splitter for SingleChunkSplitter {
    async fn split(&self, document: &InputDocument) -> Result<Vec<Chunk>> {
        Ok(Chunk::from_parts(document, vec![document.text.clone()]))
    }

    fn name(&self) -> &'static str {
        "single"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_whole_text_is_one_chunk() {
        let document = InputDocument::new("talk", "First sentence. Second sentence.");
        let chunks = SingleChunkSplitter::new().split(&document).await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, document.text);
        assert_eq!(chunks[0].total_chunks, 1);
    }
}
