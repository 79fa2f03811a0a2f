//! Documents and chunks flowing through the indexing pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property map attached to documents and chunks
pub type Properties = Map<String, Value>;

/// Document produced by a content reader, before splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDocument {
    pub document_id: String,
    pub text: String,
    #[serde(default)]
    pub properties: Properties,
}

impl InputDocument {
    pub fn new(document_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            text: text.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// Fragment of a document as stored in the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub document_id: String,
    pub chunk_id: usize,
    pub total_chunks: usize,
    pub text: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Chunk {
    /// Store key: `{document_id}_{chunk_id}`
    pub fn key(&self) -> String {
        chunk_key(&self.document_id, self.chunk_id)
    }

    /// Turn split texts into numbered chunks of `document`
    pub fn from_parts(document: &InputDocument, parts: Vec<String>) -> Vec<Chunk> {
        let parts: Vec<String> = parts
            .into_iter()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let total_chunks = parts.len();

        parts
            .into_iter()
            .enumerate()
            .map(|(chunk_id, text)| Chunk {
                document_id: document.document_id.clone(),
                chunk_id,
                total_chunks,
                text,
                properties: document.properties.clone(),
            })
            .collect()
    }
}

/// Build the store key for a chunk
pub fn chunk_key(document_id: &str, chunk_id: usize) -> String {
    format!("{}_{}", document_id, chunk_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chunk_key() {
        assert_eq!(chunk_key("rag-in-practice", 3), "rag-in-practice_3");
    }

    #[test]
    fn test_from_parts_numbers_chunks_and_drops_blank_parts() {
        let mut properties = Properties::new();
        properties.insert("room".to_string(), json!("Zaal 1"));
        let document = InputDocument::new("talk", "ignored").with_properties(properties);

        let chunks = Chunk::from_parts(
            &document,
            vec![" First. ".to_string(), "   ".to_string(), "Second.".to_string()],
        );

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "First.");
        assert_eq!(chunks[1].chunk_id, 1);
        assert!(chunks.iter().all(|c| c.total_chunks == 2));
        assert_eq!(chunks[1].properties["room"], "Zaal 1");
        assert_eq!(chunks[1].key(), "talk_1");
    }
}
