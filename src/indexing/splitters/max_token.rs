//! Max-token splitter

use async_trait::async_trait;

use crate::errors::{RagError, Result};
use crate::indexing::document::{Chunk, InputDocument};
use crate::indexing::splitters::{Splitter, TokenCounter};

/// Groups words into chunks of at most `max_tokens` estimated tokens
#[derive(Debug, Clone)]
pub struct MaxTokenSplitter {
    max_tokens: usize,
    counter: TokenCounter,
}

impl MaxTokenSplitter {
    pub fn new(max_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(RagError::InvalidSplitter(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            max_tokens,
            counter: TokenCounter::new(),
        })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Greedy packing of whitespace-separated words. A word that alone
    /// exceeds the limit becomes a chunk of its own.
    pub fn parts(&self, text: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{} {}", current, word);
            if self.counter.estimate(&candidate) > self.max_tokens {
                parts.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current = candidate;
            }
        }

        if !current.is_empty() {
            parts.push(current);
        }

        parts
    }

    /// Estimated tokens for a chunk text
    pub fn estimate(&self, text: &str) -> usize {
        self.counter.estimate(text)
    }
}

#[async_trait]
impl Splitter for MaxTokenSplitter {
    async fn split(&self, document: &InputDocument) -> Result<Vec<Chunk>> {
        Ok(Chunk::from_parts(document, self.parts(&document.text)))
    }

    fn name(&self) -> &'static str {
        "max-token"
    }
}
