//! Sentence splitter

use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::Result;
use crate::indexing::document::{Chunk, InputDocument};
use crate::indexing::splitters::Splitter;

/// Abbreviations that end with a period but never end a sentence
const ABBREVIATIONS: [&str; 8] = ["e.g.", "i.e.", "mr.", "mrs.", "dr.", "vs.", "etc.", "st."];

/// Creates one chunk per sentence
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Split text into trimmed sentences using Unicode sentence boundaries
    pub fn sentences(text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for segment in text.unicode_sentences() {
            pending.push_str(segment);

            // "e.g. Weaviate" is a boundary for UAX #29, not for us
            if ends_with_abbreviation(&pending) {
                continue;
            }

            push_trimmed(&mut sentences, &pending);
            pending.clear();
        }

        push_trimmed(&mut sentences, &pending);
        sentences
    }
}

#[async_trait]
impl Splitter for SentenceSplitter {
    async fn split(&self, document: &InputDocument) -> Result<Vec<Chunk>> {
        Ok(Chunk::from_parts(document, Self::sentences(&document.text)))
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}

fn ends_with_abbreviation(current: &str) -> bool {
    let last_word = current
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .trim_start_matches(&['(', '"', '\''][..])
        .to_lowercase();
    ABBREVIATIONS.contains(&last_word.as_str())
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
