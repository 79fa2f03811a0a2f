//! Deterministic test doubles for the RAG pipeline

#![allow(dead_code)]

use async_trait::async_trait;
use jfall_rag::embedding::Embedder;
use jfall_rag::generation::ChatService;
use jfall_rag::ollama::{ChatMessage, Role};
use jfall_rag::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

const DIMENSION: usize = 256;

/// Bag-of-words embedder hashing each lower-cased word into a fixed bucket
pub struct HashingEmbedder;

impl HashingEmbedder {
    fn vector(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; DIMENSION];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            vector[bucket(&word.to_lowercase())] += 1.0;
        }
        vector
    }
}

/// FNV-1a, stable across runs
fn bucket(word: &str) -> usize {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in word.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % DIMENSION as u64) as usize
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn identifier(&self) -> String {
        format!("test:hashing-{}", DIMENSION)
    }
}

/// Echoes the last user message, or returns a fixed verdict when asked for a judgement
pub struct EchoChat;

pub const VERDICT: &str = "{\"quality\": 4, \"reason\": \"Good enough\"}";

#[async_trait]
impl ChatService for EchoChat {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let judging = messages
            .iter()
            .any(|m| m.role == Role::System && m.content.contains("JSON object"));
        if judging {
            return Ok(VERDICT.to_string());
        }

        Ok(messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default())
    }

    fn model(&self) -> &str {
        "echo"
    }
}

pub const TALKS: &str = r#"{"speakers": ["Jasper Vermeulen"], "title": "Retrieval Augmented Generation with Java", "description": "Retrieval augmented generation combines search with a language model. First you find the chunks related to a question. Then the model writes the answer from those chunks.", "room": "Zaal 1", "time": "10:00", "tags": ["AI", "RAG"]}

{"speakers": ["Anna de Vries"], "title": "Virtual Threads in Practice", "description": "Virtual threads make it cheap to block. We migrate a reactive service back to blocking code.", "room": "Zaal 2", "time": "11:00", "tags": ["Java"]}
{"speakers": ["Sanne Bakker"], "title": "Securing Your Supply Chain", "description": "Every build pulls in hundreds of dependencies. We sign the artifacts and verify them in the pipeline.", "room": "Zaal 3", "time": "13:30", "tags": ["Security"], "video": "unknown"}
"#;

/// Write `contents` as a JSONL file in `dir`
pub fn write_talks(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("sessions.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}
