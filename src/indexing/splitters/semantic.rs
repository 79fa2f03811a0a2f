//! Semantic splitter backed by the chat model

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{RagError, Result};
use crate::generation::parse::extract_json_array;
use crate::generation::ChatService;
use crate::indexing::document::{Chunk, InputDocument};
use crate::indexing::splitters::Splitter;
use crate::ollama::ChatMessage;

const SPLIT_INSTRUCTIONS: &str = "You split texts into chunks that each cover a single topic. \
Keep the original wording and order, do not summarize or add text. \
Respond only with a JSON array of strings, one string per chunk.";

/// Asks the chat model where the topic boundaries are
pub struct SemanticSplitter {
    chat_service: Arc<dyn ChatService>,
}

impl SemanticSplitter {
    pub fn new(chat_service: Arc<dyn ChatService>) -> Self {
        Self { chat_service }
    }

    fn parse_parts(response: &str) -> Result<Vec<String>> {
        let json = extract_json_array(response).ok_or_else(|| {
            RagError::InvalidModelResponse(format!("expected a JSON array of chunks: {}", response))
        })?;

        serde_json::from_str::<Vec<String>>(json).map_err(|e| {
            warn!("Failed to parse semantic chunks: {} - Response: {}", e, response);
            RagError::InvalidModelResponse(format!("invalid chunk array: {}", e))
        })
    }
}

#[async_trait]
impl Splitter for SemanticSplitter {
    async fn split(&self, document: &InputDocument) -> Result<Vec<Chunk>> {
        if document.text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let messages = vec![
            ChatMessage::system(SPLIT_INSTRUCTIONS),
            ChatMessage::user(document.text.clone()),
        ];
        let response = self.chat_service.chat(messages).await?;
        let parts = Self::parse_parts(&response)?;

        debug!(
            document_id = %document.document_id,
            chunks = parts.len(),
            model = self.chat_service.model(),
            "Semantic split"
        );

        Ok(Chunk::from_parts(document, parts))
    }

    fn name(&self) -> &'static str {
        "semantic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parts_from_fenced_response() {
        let response = "Here you go:\n```json\n[\"RAG basics.\", \"Evaluating retrieval.\"]\n```";
        let parts = SemanticSplitter::parse_parts(response).unwrap();
        assert_eq!(parts, vec!["RAG basics.", "Evaluating retrieval."]);
    }

    #[test]
    fn test_parse_parts_rejects_prose() {
        let result = SemanticSplitter::parse_parts("I cannot split this text.");
        assert!(matches!(result, Err(RagError::InvalidModelResponse(_))));
    }

    #[test]
    fn test_parse_parts_rejects_non_strings() {
        let result = SemanticSplitter::parse_parts("[1, 2]");
        assert!(matches!(result, Err(RagError::InvalidModelResponse(_))));
    }
}
